//! Explicit create/destroy lifecycle for images shown through a GPU texture.
//!
//! The backend is never reachable from `Drop`, so the owner of a
//! [`TextureImage`] releases its texture with [`TextureImage::destroy`] or
//! [`TextureImage::replace`]. A live texture at drop time is reported as a leak.

use crate::error::Error;
use crate::Result;

use super::{PixelBuffer, Sample};

/// Borrowed, 8-bit interleaved view handed to a [`TextureBackend`].
#[derive(Clone, Copy, Debug)]
pub struct TextureUpload<'a> {
    pub bytes: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

pub trait TextureBackend {
    type Handle;

    fn create_texture(&mut self, upload: TextureUpload<'_>) -> Result<Self::Handle>;

    fn delete_texture(&mut self, handle: Self::Handle);
}

pub struct TextureImage<T, H> {
    image: PixelBuffer<T>,
    texture: Option<H>,
}

impl<T: Sample, H> TextureImage<T, H> {
    pub fn new(image: PixelBuffer<T>) -> Self {
        Self {
            image,
            texture: None,
        }
    }

    pub fn image(&self) -> &PixelBuffer<T> {
        &self.image
    }

    pub fn texture(&self) -> Option<&H> {
        self.texture.as_ref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.texture.is_some()
    }

    pub fn upload<B>(&mut self, backend: &mut B) -> Result<()>
    where
        B: TextureBackend<Handle = H>,
    {
        if self.texture.is_some() {
            return Err(Error::TextureAlreadyUploaded);
        }
        let bytes = T::display_bytes(self.image.samples());
        let handle = backend.create_texture(TextureUpload {
            bytes: &bytes,
            width: self.image.width(),
            height: self.image.height(),
            channels: self.image.channels(),
        })?;
        self.texture = Some(handle);
        Ok(())
    }

    pub fn destroy<B>(&mut self, backend: &mut B) -> Result<()>
    where
        B: TextureBackend<Handle = H>,
    {
        let handle = self.texture.take().ok_or(Error::NoTextureToDelete)?;
        backend.delete_texture(handle);
        Ok(())
    }

    /// Releases the current texture, if any, and uploads `image` in its place.
    pub fn replace<B>(&mut self, image: PixelBuffer<T>, backend: &mut B) -> Result<()>
    where
        B: TextureBackend<Handle = H>,
    {
        if self.texture.is_some() {
            self.destroy(backend)?;
        }
        self.image = image;
        self.upload(backend)
    }
}

impl<T, H> Drop for TextureImage<T, H> {
    fn drop(&mut self) {
        if self.texture.is_some() {
            log::warn!("Texture image dropped without releasing its texture");
        }
    }
}
