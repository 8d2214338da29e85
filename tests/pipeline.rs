//! End-to-end pipeline tests through the public library API.

use runbook::backend::{BackendError, CompletionBackend, NullBackend};
use runbook::diff::{PatchSynthesizer, extract_files, summarize};
use runbook::error::RunbookError;
use runbook::executor::{Executor, TaskRequest};
use runbook::template::VariableBinding;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Backend that answers with whole-file blocks and remembers the prompts.
struct FileBlockBackend {
    seen: RefCell<Option<(String, String)>>,
}

impl CompletionBackend for FileBlockBackend {
    fn name(&self) -> &str {
        "file-blocks"
    }

    fn complete(
        &self,
        system: &str,
        user: &str,
        _temperature: f64,
        _max_tokens: u32,
    ) -> Result<String, BackendError> {
        *self.seen.borrow_mut() = Some((system.to_string(), user.to_string()));
        Ok("---COMMIT_MSG---\nfeat(api): add spec\n---PATCH---\n\
            ---FILE:openapi.yaml---\nopenapi: 3.1.0\n---END---\n"
            .to_string())
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn no_environment(_: &str) -> Option<String> {
    None
}

#[test]
fn shared_task_with_context_directory_and_previews() {
    let repo = TempDir::new().unwrap();
    let context = TempDir::new().unwrap();
    write(
        context.path(),
        "tasks/gen-api.md",
        "---\n\
         description: Generate an API spec\n\
         context:\n  - /specs\n\
         repo:\n  - src/routes.rs\n\
         guarantees:\n  - OpenAPI 3.1\n\
         inputs:\n  - openapi.yaml\n\
         ---\n\
         Write the spec for {SERVICE}.\n",
    );
    write(context.path(), "specs/standards.md", "Use snake_case.");
    write(context.path(), "specs/errors/envelope.md", "{ error }");
    write(repo.path(), "src/routes.rs", "fn routes() {}");

    let backend = FileBlockBackend {
        seen: RefCell::new(None),
    };
    let executor = Executor::new(backend).with_environment(no_environment);
    let variables: VariableBinding = [("SERVICE", "billing")].into_iter().collect();
    let request = TaskRequest::new(repo.path(), "gen-api")
        .with_context_root(context.path())
        .with_variables(variables);

    let parsed = executor.execute(&request).unwrap();
    assert_eq!(parsed.commit_message, "feat(api): add spec");

    let seen = executor.backend().seen.borrow();
    let (system, user) = seen.as_ref().unwrap();
    assert!(system.starts_with("Task: Generate an API spec\n\nRequirements:\n- OpenAPI 3.1\n"));
    let envelope = system.find("--- specs/errors/envelope.md ---").unwrap();
    let standards = system.find("--- specs/standards.md ---").unwrap();
    let routes = system.find("--- repo:src/routes.rs ---").unwrap();
    assert!(envelope < standards && standards < routes);
    assert!(user.starts_with("Instructions:\nWrite the spec for billing."));
    assert!(user.contains("\nRepository structure:\n"));
    assert!(!user.contains("Relevant repository files:\n\n---"));

    // The reply carried whole files; turn them into a real patch.
    let files = extract_files(&parsed.patch);
    let patch = PatchSynthesizer::new(repo.path())
        .generate_all(&files)
        .unwrap();
    assert!(patch.starts_with("diff --git a/openapi.yaml b/openapi.yaml\nnew file mode 100644\n--- /dev/null\n+++ b/openapi.yaml\n"));
    assert_eq!(summarize(&patch).added, 1);
}

#[test]
fn null_backend_dry_run() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "tasks/noop.md", "---\ndescription: Nothing\n---\n");

    let parsed = Executor::new(NullBackend)
        .with_environment(no_environment)
        .execute(&TaskRequest::new(repo.path(), "noop"))
        .unwrap();

    assert_eq!(parsed.commit_message, "feat: mock change");
    assert!(parsed.patch.starts_with("diff --git a/test.txt b/test.txt"));
}

#[test]
fn every_missing_context_spec_is_reported() {
    let repo = TempDir::new().unwrap();
    let context = TempDir::new().unwrap();
    write(
        repo.path(),
        "tasks/gen.md",
        "---\ncontext:\n  - /a.md\n  - /present.md\n  - /b.md\n---\n",
    );
    write(context.path(), "present.md", "here");

    let err = Executor::new(NullBackend)
        .with_environment(no_environment)
        .execute(&TaskRequest::new(repo.path(), "gen").with_context_root(context.path()))
        .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, RunbookError::MissingContext(ref missing) if missing.len() == 2));
    assert!(message.contains("/a.md ->"));
    assert!(message.contains("/b.md ->"));
    assert!(!message.contains("/present.md"));
}

#[test]
fn malformed_task_is_reported_with_task_name() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "tasks/broken.md", "no front matter here");

    let err = Executor::new(NullBackend)
        .with_environment(no_environment)
        .execute(&TaskRequest::new(repo.path(), "broken"))
        .unwrap_err();

    assert!(matches!(err, RunbookError::MalformedTask { ref task, .. } if task == "broken"));
}
