//! Opaque handles to GPU resources owned by [`Renderer2d`](super::Renderer2d).

macro_rules! resource_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_index(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

resource_handle!(
    /// Uploaded font bitmap (`R8Unorm`, 512x512).
    FontHandle
);
resource_handle!(
    /// Uploaded sprite atlas texture with its mip chain.
    AtlasHandle
);
resource_handle!(
    /// Static sprite quad geometry.
    SpriteHandle
);
