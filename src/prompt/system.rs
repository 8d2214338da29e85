//! System prompt construction.

use crate::context::ResolvedContext;
use crate::task::TaskDefinition;

/// Output-format instructions appended to every system prompt.
pub const OUTPUT_FORMAT: &str = "
Output format:
1. Start with ---COMMIT_MSG---
2. Provide a commit message (conventional commits format)
3. Follow with ---PATCH---
4. Provide a git unified diff patch starting from the repository root
5. The patch must be valid and apply cleanly

Example:
---COMMIT_MSG---
feat(api): generate OpenAPI specification

- Adds openapi.yaml using org-standard conventions
- Includes pagination, error envelope, and auth scheme
---PATCH---
diff --git a/openapi.yaml b/openapi.yaml
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/openapi.yaml
@@ -0,0 +1,10 @@
+openapi: 3.1.0
+...
";

/// Build the system prompt from the task definition and aggregated files.
pub fn build_system_prompt(task: &TaskDefinition, context: &ResolvedContext) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(description) = task.description() {
        parts.push(format!("Task: {}", description));
    }

    let guarantees = task.guarantees();
    if !guarantees.is_empty() {
        parts.push("\nRequirements:".to_string());
        parts.extend(guarantees.iter().map(|g| format!("- {}", g)));
    }

    if !context.is_empty() {
        parts.push("\nContext:".to_string());
        parts.extend(
            context
                .iter()
                .map(|(path, content)| format!("\n--- {} ---\n{}", path, content)),
        );
    }

    parts.push(OUTPUT_FORMAT.to_string());

    parts.join("\n")
}
