use std::fmt;

/// Pixel layout of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Bgra8,
    Rgb8,
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgra8 => 4,
            Self::Rgb8 => 3,
            Self::Gray8 => 1,
        }
    }
}

/// One captured image, handed from the capture session to the classifier.
///
/// The classifier takes the frame by value and drops it once inference
/// returns; nothing else keeps a copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// A frame of `width` x `height` filled with a single byte value.
    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u8) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self::new(width, height, format, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the buffer length matches the declared dimensions.
    pub fn is_well_formed(&self) -> bool {
        let expected = self.width as usize * self.height as usize * self.format.bytes_per_pixel();
        self.data.len() == expected
    }
}

// Buffers are large; keep debug output to the shape.
impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_frame_is_well_formed() {
        let frame = Frame::filled(4, 3, PixelFormat::Bgra8, 0x80);
        assert_eq!(frame.data().len(), 48);
        assert!(frame.is_well_formed());
    }

    #[test]
    fn short_buffer_is_not_well_formed() {
        let frame = Frame::new(4, 3, PixelFormat::Rgb8, vec![0; 10]);
        assert!(!frame.is_well_formed());
    }

    #[test]
    fn equality_is_shape_and_pixels() {
        let first = Frame::filled(2, 2, PixelFormat::Gray8, 7);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = Frame::filled(2, 2, PixelFormat::Gray8, 7);

        assert_eq!(first, second);
        assert_ne!(first, Frame::filled(2, 2, PixelFormat::Gray8, 8));
        assert_ne!(first, Frame::filled(1, 4, PixelFormat::Gray8, 7));
    }

    #[test]
    fn debug_omits_pixels() {
        let frame = Frame::filled(2, 2, PixelFormat::Gray8, 7);
        let out = format!("{:?}", frame);
        assert!(out.contains("bytes: 4"));
        assert!(!out.contains("[7"));
    }
}
