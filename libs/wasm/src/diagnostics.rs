//! WASM-compatible diagnostic types.
//!
//! JavaScript-facing wrappers for calculator diagnostics.

use tuning_calc::{Diagnostic as RustDiagnostic, Severity as RustSeverity};
use wasm_bindgen::prelude::*;

/// Diagnostic severity for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl From<RustSeverity> for Severity {
    fn from(severity: RustSeverity) -> Self {
        match severity {
            RustSeverity::Error => Severity::Error,
            RustSeverity::Warning => Severity::Warning,
        }
    }
}

/// A diagnostic message for JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const diag = result.diagnostics().get(0);
/// // console.log(diag.message(), diag.field());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    field: Option<String>,
    hint: Option<String>,
}

#[wasm_bindgen]
impl Diagnostic {
    /// Returns the severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Returns the snake_case name of the form field concerned, if any.
    pub fn field(&self) -> Option<String> {
        self.field.clone()
    }

    /// Returns the hint, if any.
    pub fn hint(&self) -> Option<String> {
        self.hint.clone()
    }

    /// Converts this diagnostic to a plain JavaScript object.
    ///
    /// This is useful for passing data between the worker and main thread,
    /// as wasm-bindgen wrappers cannot be transferred.
    pub fn to_js_object(&self) -> JsValue {
        use js_sys::{Object, Reflect};

        let obj = Object::new();
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let _ = Reflect::set(&obj, &JsValue::from_str("severity"), &JsValue::from_str(severity));
        let _ = Reflect::set(&obj, &JsValue::from_str("message"), &JsValue::from_str(&self.message));

        if let Some(field) = &self.field {
            let _ = Reflect::set(&obj, &JsValue::from_str("field"), &JsValue::from_str(field));
        }
        if let Some(hint) = &self.hint {
            let _ = Reflect::set(&obj, &JsValue::from_str("hint"), &JsValue::from_str(hint));
        }

        JsValue::from(obj)
    }
}

impl Diagnostic {
    /// Rust-side accessor used by native tests.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<RustDiagnostic> for Diagnostic {
    fn from(diag: RustDiagnostic) -> Self {
        // Field names follow the serde representation used by JSON requests.
        let field = diag
            .field
            .and_then(|f| serde_json::to_value(f).ok())
            .and_then(|v| v.as_str().map(str::to_string));
        Self {
            severity: diag.severity.into(),
            message: diag.message,
            field,
            hint: diag.hint,
        }
    }
}

/// A collection of diagnostics.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

#[wasm_bindgen]
impl DiagnosticList {
    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns a diagnostic by index.
    pub fn get(&self, index: usize) -> Option<Diagnostic> {
        self.diagnostics.get(index).cloned()
    }
}

impl DiagnosticList {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl FromIterator<RustDiagnostic> for DiagnosticList {
    fn from_iter<I: IntoIterator<Item = RustDiagnostic>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Diagnostic::from).collect())
    }
}
