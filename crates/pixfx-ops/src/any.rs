//! Runtime-typed images and dispatch to typed kernels.
//!
//! Hosts hand images over with a depth and component count known only at
//! runtime. [`ImageProcessor::process_any`] checks every source against the
//! destination, then instantiates the kernel for the concrete sample type
//! and channel count.

use half::f16;
use tracing::warn;

use crate::abort::Abort;
use crate::error::{OpsError, OpsResult};
use crate::processor::{ImageProcessor, PixelKernel, RenderStatus};
use pixfx_core::{BitDepth, Components, ImageBuffer, ImageFormat, RectI, RenderScale, Sample};

/// Image buffer of any supported depth.
#[derive(Debug, Clone)]
pub enum AnyImage {
    /// 8-bit unsigned
    U8(ImageBuffer<u8>),
    /// 16-bit unsigned
    U16(ImageBuffer<u16>),
    /// 16-bit float
    F16(ImageBuffer<f16>),
    /// 32-bit float
    F32(ImageBuffer<f32>),
}

macro_rules! with_image {
    ($any:expr, $img:ident => $body:expr) => {
        match $any {
            AnyImage::U8($img) => $body,
            AnyImage::U16($img) => $body,
            AnyImage::F16($img) => $body,
            AnyImage::F32($img) => $body,
        }
    };
}

impl AnyImage {
    /// Allocates a zeroed image of the given format.
    pub fn new(bounds: RectI, format: ImageFormat) -> OpsResult<Self> {
        let c = format.components;
        Ok(match format.depth {
            BitDepth::U8 => Self::U8(ImageBuffer::new(bounds, c)?),
            BitDepth::U16 => Self::U16(ImageBuffer::new(bounds, c)?),
            BitDepth::F16 => Self::F16(ImageBuffer::new(bounds, c)?),
            BitDepth::F32 => Self::F32(ImageBuffer::new(bounds, c)?),
        })
    }

    /// Sample depth.
    pub fn depth(&self) -> BitDepth {
        match self {
            Self::U8(_) => BitDepth::U8,
            Self::U16(_) => BitDepth::U16,
            Self::F16(_) => BitDepth::F16,
            Self::F32(_) => BitDepth::F32,
        }
    }

    /// Channel layout.
    pub fn components(&self) -> Components {
        with_image!(self, img => img.components())
    }

    /// Depth and layout.
    pub fn format(&self) -> ImageFormat {
        ImageFormat::new(self.depth(), self.components())
    }

    /// Pixel bounds.
    pub fn bounds(&self) -> RectI {
        with_image!(self, img => img.bounds())
    }

    /// Render scale.
    pub fn render_scale(&self) -> RenderScale {
        with_image!(self, img => img.render_scale())
    }

    /// Pixel `(x, y)` as normalized `f32` values.
    pub fn pixel_normalized(&self, x: i32, y: i32) -> Option<Vec<f32>> {
        with_image!(self, img => img
            .pixel(x, y)
            .map(|px| px.iter().map(|v| v.to_normalized()).collect()))
    }

    /// Typed view, `None` when the depth differs.
    pub fn as_typed<T: AnySample>(&self) -> Option<&ImageBuffer<T>> {
        T::from_any(self)
    }

    /// Mutable typed view, `None` when the depth differs.
    pub fn as_typed_mut<T: AnySample>(&mut self) -> Option<&mut ImageBuffer<T>> {
        T::from_any_mut(self)
    }
}

/// Sample types stored in an [`AnyImage`].
pub trait AnySample: Sample {
    /// Borrows the typed buffer.
    fn from_any(image: &AnyImage) -> Option<&ImageBuffer<Self>>;
    /// Mutably borrows the typed buffer.
    fn from_any_mut(image: &mut AnyImage) -> Option<&mut ImageBuffer<Self>>;
    /// Wraps a typed buffer.
    fn into_any(image: ImageBuffer<Self>) -> AnyImage;
}

macro_rules! impl_any_sample {
    ($t:ty, $variant:ident) => {
        impl AnySample for $t {
            fn from_any(image: &AnyImage) -> Option<&ImageBuffer<Self>> {
                match image {
                    AnyImage::$variant(img) => Some(img),
                    _ => None,
                }
            }

            fn from_any_mut(image: &mut AnyImage) -> Option<&mut ImageBuffer<Self>> {
                match image {
                    AnyImage::$variant(img) => Some(img),
                    _ => None,
                }
            }

            fn into_any(image: ImageBuffer<Self>) -> AnyImage {
                AnyImage::$variant(image)
            }
        }

        impl From<ImageBuffer<$t>> for AnyImage {
            fn from(img: ImageBuffer<$t>) -> Self {
                <$t as AnySample>::into_any(img)
            }
        }
    };
}

impl_any_sample!(u8, U8);
impl_any_sample!(u16, U16);
impl_any_sample!(f16, F16);
impl_any_sample!(f32, F32);

impl ImageProcessor {
    /// Renders `window` of a runtime-typed destination.
    ///
    /// Every connected source must match the destination depth, component
    /// layout and render scale; the first mismatch is returned before the
    /// kernel runs. Mask slots declared by the kernel may have any layout.
    pub fn process_any<K, A>(
        &self,
        kernel: &mut K,
        dst: &mut AnyImage,
        sources: &[Option<&AnyImage>],
        window: RectI,
        abort: &A,
    ) -> OpsResult<RenderStatus>
    where
        K: PixelKernel,
        A: Abort + ?Sized,
    {
        let format = dst.format();
        for (index, src) in sources.iter().enumerate() {
            let Some(src) = src else { continue };
            if src.depth() != format.depth {
                warn!(index, expected = %format.depth, got = %src.depth(), "Source depth mismatch");
                return Err(OpsError::DepthMismatch {
                    index,
                    expected: format.depth,
                    got: src.depth(),
                });
            }
            if src.components() != format.components && !kernel.mask_slots().contains(&index) {
                warn!(index, expected = %format.components, got = %src.components(), "Source component mismatch");
                return Err(OpsError::ComponentMismatch {
                    index,
                    expected: format.components,
                    got: src.components(),
                });
            }
        }

        match dst {
            AnyImage::U8(img) => self.dispatch_typed(kernel, img, sources, window, abort),
            AnyImage::U16(img) => self.dispatch_typed(kernel, img, sources, window, abort),
            AnyImage::F16(img) => self.dispatch_typed(kernel, img, sources, window, abort),
            AnyImage::F32(img) => self.dispatch_typed(kernel, img, sources, window, abort),
        }
    }

    fn dispatch_typed<T, K, A>(
        &self,
        kernel: &mut K,
        dst: &mut ImageBuffer<T>,
        sources: &[Option<&AnyImage>],
        window: RectI,
        abort: &A,
    ) -> OpsResult<RenderStatus>
    where
        T: AnySample,
        K: PixelKernel,
        A: Abort + ?Sized,
    {
        let typed = sources
            .iter()
            .enumerate()
            .map(|(index, src)| {
                src.map(|img| {
                    T::from_any(img).ok_or(OpsError::DepthMismatch {
                        index,
                        expected: T::DEPTH,
                        got: img.depth(),
                    })
                })
                .transpose()
            })
            .collect::<OpsResult<Vec<_>>>()?;

        match dst.components() {
            Components::Alpha => self.process::<T, 1, K, A>(kernel, dst, &typed, window, abort),
            Components::Xy => self.process::<T, 2, K, A>(kernel, dst, &typed, window, abort),
            Components::Rgb => self.process::<T, 3, K, A>(kernel, dst, &typed, window, abort),
            Components::Rgba => self.process::<T, 4, K, A>(kernel, dst, &typed, window, abort),
        }
    }
}
