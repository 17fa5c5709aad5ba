//! JSON output types for machine-readable CLI output.
//!
//! Every `--json` command prints one `{ success, errors, result }` envelope
//! so tools can parse the outcome without scraping colored text.

use serde::{Deserialize, Serialize};
use spritebake_combine::CombineError;
use spritebake_spec::SceneError;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Scene file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Scene JSON could not be parsed
    pub const JSON_PARSE: &str = "CLI_002";
    /// Scene failed validation
    pub const INVALID_SCENE: &str = "CLI_003";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_004";
    /// No sprites were collected
    pub const NO_SPRITES: &str = "CLI_010";
    /// A sprite's texture could not be read
    pub const SOURCE_UNREADABLE: &str = "CLI_011";
    /// Combine settings were rejected
    pub const INVALID_CONFIGURATION: &str = "CLI_012";
    /// PNG encoding failed
    pub const PNG_ENCODING: &str = "CLI_013";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Converts a scene loading or validation error to a JSON error.
pub fn scene_error_to_json(error: &SceneError, file: &str) -> JsonError {
    let code = match error {
        SceneError::Io(_) => error_codes::FILE_READ,
        SceneError::JsonParse(_) => error_codes::JSON_PARSE,
        _ => error_codes::INVALID_SCENE,
    };
    JsonError::new(code, error.to_string()).with_file(file)
}

/// Converts a combine error to a JSON error.
pub fn combine_error_to_json(error: &CombineError) -> JsonError {
    let code = match error {
        CombineError::NoSpritesFound => error_codes::NO_SPRITES,
        CombineError::SourceUnreadable { .. } => error_codes::SOURCE_UNREADABLE,
        CombineError::InvalidConfiguration(_) => error_codes::INVALID_CONFIGURATION,
        CombineError::Png(_) => error_codes::PNG_ENCODING,
    };
    JsonError::new(code, error.to_string())
}

/// Result of a successful combine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombineResult {
    /// Asset name (`<scene>_<combiner>`)
    pub asset_name: String,
    /// Path of the written PNG
    pub image_path: String,
    /// Path of the written manifest
    pub manifest_path: String,
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// BLAKE3 hash of the PNG
    pub hash: String,
    /// Number of sprites combined
    pub sprite_count: usize,
    /// World-space center of the combined sprite
    pub center: [f64; 2],
    /// Whether a scene object was created or updated
    pub scene_object: bool,
}

/// JSON output for the `combine` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineOutput {
    /// Whether the combine succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Combine result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CombineResult>,
}

impl CombineOutput {
    /// Creates a successful combine output.
    pub fn success(result: CombineResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed combine output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Summary of a validated scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateResult {
    /// Scene name
    pub scene: String,
    /// Number of textures in the texture table
    pub textures: usize,
    /// Number of sprite renderers the combiner would collect
    pub sprite_renderers: usize,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the scene is valid
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Scene summary (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidateResult>,
}

impl ValidateOutput {
    /// Creates a successful validate output.
    pub fn success(result: ValidateResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed validate output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}
