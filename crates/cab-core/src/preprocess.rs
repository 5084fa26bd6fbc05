use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default lookup-word preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC), folds full-width forms
        let text: String = text.nfkc().collect();

        // Selections often carry line breaks from the page layout
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
