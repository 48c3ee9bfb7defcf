//! Fixed texts exchanged with the model and shown to the user.

pub const CALORIE_INSTRUCTION: &str = "\
You are an expert nutritionist AI. Based on your training data, estimate the calorie content of the food items in the image.
Even if you don't have all the details, provide an estimated calorie count for each food item visible, assuming typical preparation methods and ingredients.

Please provide the information in the following format:
1. Item 1 - estimated number of calories
2. Item 2 - estimated number of calories
...
";

/// Disclaimers meaning the model declined to estimate anything.
pub const REFUSAL_PHRASES: &[&str] = &["I am an AI and I cannot perform actions"];

pub const REFUSAL_FALLBACK: &str = "The AI could not calculate the calories accurately. Please provide a different image or prompt.";

pub const NO_VALID_RESPONSE: &str = "Error: No valid response received from API.";

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image file.";

pub const IMAGE_PROCESSING_FAILED: &str = "Image processing failed. Please try again.";

pub const UNSUPPORTED_IMAGE_MESSAGE: &str =
    "Unsupported file type. Please upload a JPG, JPEG or PNG image.";

/// Substring match after lowercasing and collapsing whitespace.
pub fn is_refusal(text: &str) -> bool {
    let normalized = normalize(text);
    REFUSAL_PHRASES
        .iter()
        .any(|phrase| normalized.contains(&normalize(phrase)))
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
