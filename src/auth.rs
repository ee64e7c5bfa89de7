// 🔐 Credential Verifier - One-shot login gate for a single local account
//
// No rate limiting, no lockout, no session tokens. A successful call only
// opens the shell; nothing downstream checks authorization again.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

const ACCOUNT_USERNAME: &str = "admin";

/// SHA-256 of the account password ("123456")
const ACCOUNT_PASSWORD_SHA256: &str =
    "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92";

const ACCOUNT_PERMISSIONS: &[&str] = &["CONTENT_CREATE", "SYSTEM_AUDIT", "ANALYTICS_VIEW"];

pub const REASON_VERIFIED: &str = "verified";
pub const REASON_EMPTY: &str = "credentials empty";
pub const REASON_MISMATCH: &str = "identity mismatch";

/// Outcome of a credential check. A rejection is a normal value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub reason: &'static str,
}

impl Verdict {
    fn accept() -> Self {
        Verdict {
            valid: true,
            reason: REASON_VERIFIED,
        }
    }

    fn reject(reason: &'static str) -> Self {
        Verdict {
            valid: false,
            reason,
        }
    }
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a username/password pair against the stored account.
///
/// Fails closed on empty input; any other mismatch (wrong user or wrong
/// password) reports the same reason so the two cannot be told apart.
pub fn verify(username: &str, password: &str) -> Verdict {
    if username.is_empty() || password.is_empty() {
        warn!("login rejected: {}", REASON_EMPTY);
        return Verdict::reject(REASON_EMPTY);
    }

    let matches = username == ACCOUNT_USERNAME && hash_password(password) == ACCOUNT_PASSWORD_SHA256;
    if matches {
        info!(user = username, "login accepted");
        Verdict::accept()
    } else {
        warn!("login rejected: {}", REASON_MISMATCH);
        Verdict::reject(REASON_MISMATCH)
    }
}

/// Permissions shown in the shell header. Display only.
pub fn permissions(username: &str) -> &'static [&'static str] {
    if username == ACCOUNT_USERNAME {
        ACCOUNT_PERMISSIONS
    } else {
        &[]
    }
}
