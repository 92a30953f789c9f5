//! Raster decoding and image XObject construction.

use kpdf_layout::{DecodedImage, ImageFormat};
use kpdf_render_core::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::io::Write;

/// An image XObject already added to the document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EmbeddedImage {
    pub id: ObjectId,
    pub width: u32,
    pub height: u32,
}

pub(crate) fn flate_compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn codec_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
    }
}

/// Decodes the raster and adds it as a Flate-compressed RGB XObject.
///
/// Alpha, when present, goes into a separate soft mask. Returns
/// `RenderError::Image` when the pixels cannot be decoded.
pub(crate) fn embed_image(
    doc: &mut Document,
    image: &DecodedImage,
) -> Result<EmbeddedImage, RenderError> {
    let decoded = image::load_from_memory_with_format(&image.data, codec_format(image.format))
        .map_err(|e| RenderError::Image(format!("cannot decode {} raster: {}", image.format, e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(RenderError::Image("raster has no pixels".into()));
    }

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };

    if decoded.color().has_alpha() {
        let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p[3]).collect();
        let mask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            flate_compress(&alpha)?,
        );
        let mask_id = doc.add_object(mask);
        dict.set("SMask", Object::Reference(mask_id));
    }

    let stream = Stream::new(dict, flate_compress(decoded.to_rgb8().as_raw())?);
    let id = doc.add_object(stream);
    log::debug!(
        "Embedded {} image {}x{} as object {:?}",
        image.format,
        width,
        height,
        id
    );
    Ok(EmbeddedImage { id, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn embeds_png_with_dimensions() {
        let png = encode(
            RgbImage::from_pixel(4, 2, Rgb([200, 10, 10])).into(),
            image::ImageFormat::Png,
        );
        let mut doc = Document::with_version("1.7");
        let embedded = embed_image(&mut doc, &DecodedImage { format: ImageFormat::Png, data: png }).unwrap();
        assert_eq!((embedded.width, embedded.height), (4, 2));

        let stream = doc.get_object(embedded.id).unwrap().as_stream().unwrap();
        assert_eq!(stream.dict.get(b"Filter").unwrap().as_name().unwrap(), b"FlateDecode");
        assert!(stream.dict.get(b"SMask").is_err());
    }

    #[test]
    fn alpha_channel_becomes_soft_mask() {
        let png = encode(
            RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 128])).into(),
            image::ImageFormat::Png,
        );
        let mut doc = Document::with_version("1.7");
        let embedded = embed_image(&mut doc, &DecodedImage { format: ImageFormat::Png, data: png }).unwrap();
        let stream = doc.get_object(embedded.id).unwrap().as_stream().unwrap();
        assert!(stream.dict.get(b"SMask").unwrap().as_reference().is_ok());
    }

    #[test]
    fn embeds_jpeg() {
        let jpeg = encode(
            RgbImage::from_pixel(8, 8, Rgb([10, 200, 10])).into(),
            image::ImageFormat::Jpeg,
        );
        let mut doc = Document::with_version("1.7");
        let embedded = embed_image(&mut doc, &DecodedImage { format: ImageFormat::Jpeg, data: jpeg }).unwrap();
        assert_eq!((embedded.width, embedded.height), (8, 8));
    }

    #[test]
    fn truncated_raster_is_an_image_error() {
        let mut doc = Document::with_version("1.7");
        let result = embed_image(
            &mut doc,
            &DecodedImage { format: ImageFormat::Png, data: vec![0x89, 0x50, 0x4E, 0x47] },
        );
        assert!(matches!(result, Err(RenderError::Image(_))));
    }
}
