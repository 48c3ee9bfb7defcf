use gemini_health::config::{Config, GeminiConfig, LogsConfig, ServerConfig};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

pub const BOUNDARY: &str = "----gemini-health-test-boundary";

/// A typical, well-behaved model answer.
pub const SAMPLE_ANSWER: &str = "\
1. Grilled chicken breast - 280 calories
2. Steamed rice - 205 calories
3. Broccoli - 55 calories

Total: approximately 540 calories";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        gemini: GeminiConfig {
            api_key: Some("test-api-key".to_string()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            instruction: None,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 1024 * 1024,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
    }
}

pub fn sample_png() -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(24, 16, Rgba([230, 180, 60, 255])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

pub fn sample_jpeg() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(24, 16, Rgb([120, 200, 90])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("encode jpeg");
    buf
}

/// A file part for [`multipart_body`]: (file name, content type, bytes).
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn file_part<'a>(file_name: &'a str, content_type: &'a str, bytes: &'a [u8]) -> FilePart<'a> {
    (file_name, content_type, bytes)
}

/// Builds a `multipart/form-data` body the way a browser posts the form.
pub fn multipart_body(prompt: Option<&str>, file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(prompt) = prompt {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{prompt}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// True when `line` looks like `<item> - <number> calories`.
pub fn is_calorie_line(line: &str) -> bool {
    let Some((item, rest)) = line.split_once(" - ") else {
        return false;
    };
    let mut words = rest.split_whitespace();
    let number = words.next().unwrap_or("");
    let unit = words.next().unwrap_or("");
    !item.trim().is_empty()
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        && unit.trim_end_matches('.') == "calories"
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
gemini:
  api_key: "yaml-api-key"
  model: "gemini-1.5-pro"
  instruction: "List each food with its calories."

server:
  host: "127.0.0.1"
  port: 9090
  max_upload_bytes: 2048
  logs:
    level: "debug"
"#;
