//! Dry-run backend.

use super::{BackendError, CompletionBackend};

/// Reply returned by [`NullBackend`] for every request.
pub const NULL_RESPONSE: &str = "---COMMIT_MSG---\nfeat: mock change\n---PATCH---\ndiff --git a/test.txt b/test.txt\nnew file mode 100644\nindex 0000000..1234567\n--- /dev/null\n+++ b/test.txt\n@@ -0,0 +1 @@\n+mock content\n";

/// Backend that never leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl CompletionBackend for NullBackend {
    fn name(&self) -> &str {
        "null"
    }

    fn complete(
        &self,
        _system: &str,
        _user: &str,
        _temperature: f64,
        _max_tokens: u32,
    ) -> Result<String, BackendError> {
        tracing::info!("Null backend returning mock response");
        Ok(NULL_RESPONSE.to_string())
    }
}
