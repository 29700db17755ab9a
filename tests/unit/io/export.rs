//! Tests for saving images by extension

#[cfg(test)]
mod tests {

    use crate::split;
    use photomosaic::MosaicError;
    use photomosaic::io::decoder::decode;
    use photomosaic::io::export::{ExportOptions, save_image};

    // Tests PNG output is lossless and creates missing directories
    // Verified by writing into the existing directory only
    #[test]
    fn test_save_png_roundtrip() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory should be creatable");
        };
        let image = split(6, 4, [10, 20, 30], [40, 50, 60]);
        let path = dir.path().join("nested").join("out.png");

        let Ok(()) = save_image(&image, &path, &ExportOptions::default()) else {
            unreachable!("PNG export should succeed");
        };
        let Ok(decoded) = decode(&path) else {
            unreachable!("saved PNG should decode");
        };
        assert_eq!(decoded, image);
    }

    // Tests JPEG output drops alpha and keeps dimensions
    #[test]
    fn test_save_jpeg() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory should be creatable");
        };
        let image = split(16, 8, [200, 0, 0], [0, 0, 200]);
        let path = dir.path().join("out.jpg");

        let options = ExportOptions { jpeg_quality: 75 };
        let Ok(()) = save_image(&image, &path, &options) else {
            unreachable!("JPEG export should succeed");
        };
        let Ok(decoded) = decode(&path) else {
            unreachable!("saved JPEG should decode");
        };
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    // Tests unknown extensions and bad quality are rejected before writing
    // Verified by falling back to PNG
    #[test]
    fn test_save_rejects_bad_options() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory should be creatable");
        };
        let image = split(2, 2, [0, 0, 0], [255, 255, 255]);

        let unknown = dir.path().join("out.xyz");
        assert!(matches!(
            save_image(&image, &unknown, &ExportOptions::default()),
            Err(MosaicError::InvalidRequest {
                parameter: "output",
                ..
            })
        ));
        assert!(!unknown.exists());

        let jpeg = dir.path().join("out.jpg");
        assert!(matches!(
            save_image(&image, &jpeg, &ExportOptions { jpeg_quality: 0 }),
            Err(MosaicError::InvalidRequest {
                parameter: "jpeg_quality",
                ..
            })
        ));
        assert!(!jpeg.exists());
    }
}
