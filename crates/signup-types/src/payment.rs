//! Payment Selections
//!
//! The wizard records which payment method the user picked and whether the
//! provider confirmed the charge. Actual payment processing happens outside
//! the core; the confirmation flag is trusted as reported by the caller.

use serde::{Deserialize, Serialize};

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Redsys,
    Bizum,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Redsys => "redsys",
            Self::Bizum => "bizum",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Chosen method plus provider confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSelections {
    pub method: Option<PaymentMethod>,
    pub confirmed: bool,
}

impl PaymentSelections {
    /// Pick (or re-pick) a method. Re-picking resets nothing else.
    pub fn choose(&mut self, method: PaymentMethod) {
        self.method = Some(method);
    }

    /// Confirmation is only meaningful once a method exists.
    pub fn can_confirm(&self) -> bool {
        self.method.is_some()
    }
}
