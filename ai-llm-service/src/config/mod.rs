pub mod gemini_config;
