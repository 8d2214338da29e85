//! Pipeline orchestration.
//!
//! One run resolves a task, loads the environment it requires, aggregates
//! context and repository files, assembles prompts, calls the backend once and
//! parses the reply. Every stage is fail-closed; the first error ends the run
//! and is returned unchanged.

use crate::backend::CompletionBackend;
use crate::config::Config;
use crate::context::{self, ResolvedContext, Source};
use crate::context::specs::declared_specs;
use crate::diff::summarize;
use crate::error::{Result, RunbookError};
use crate::prompt::{DEFAULT_STRUCTURE_DEPTH, PromptAssembler, PromptPair};
use crate::response::{ParsedResponse, parse_response};
use crate::task::{TaskDefinition, load_environment};
use crate::template::VariableBinding;
use std::path::PathBuf;


/// Default sampling temperature when no config is supplied.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default response token budget when no config is supplied.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// What to run and where.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub repo_root: PathBuf,
    /// `None` when no context tree is available.
    pub context_root: Option<PathBuf>,
    pub task_name: String,
    /// Caller-supplied values; these win over environment values.
    pub variables: VariableBinding,
}

impl TaskRequest {
    pub fn new(repo_root: impl Into<PathBuf>, task_name: impl Into<String>) -> Self {
        Self {
            repo_root: repo_root.into(),
            context_root: None,
            task_name: task_name.into(),
            variables: VariableBinding::new(),
        }
    }

    pub fn with_context_root(mut self, context_root: impl Into<PathBuf>) -> Self {
        self.context_root = Some(context_root.into());
        self
    }

    pub fn with_variables(mut self, variables: VariableBinding) -> Self {
        self.variables = variables;
        self
    }
}

/// Runs tasks against a single backend.
pub struct Executor<B> {
    backend: B,
    temperature: f64,
    max_tokens: u32,
    structure_depth: usize,
    environment: EnvLookup,
}

impl<B: CompletionBackend> Executor<B> {
    /// Executor reading the process environment, with default generation settings.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            structure_depth: DEFAULT_STRUCTURE_DEPTH,
            environment: Box::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Executor using the temperature and token budget from `config`.
    pub fn from_config(backend: B, config: &Config) -> Self {
        Self::new(backend).with_generation(config.temperature(), config.llm_max_tokens)
    }

    pub fn with_generation(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_structure_depth(mut self, depth: usize) -> Self {
        self.structure_depth = depth;
        self
    }

    /// Replace the lookup used for a task's required environment variables.
    pub fn with_environment<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.environment = Box::new(lookup);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the whole pipeline.
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedResponse)` - Commit message and patch from the backend reply
    /// * `Err(RunbookError::Backend)` - The backend call failed
    /// * `Err(RunbookError::MalformedResponse)` - The reply lacks the expected markers
    /// * Any error from [`Executor::prepare`]
    pub fn execute(&self, request: &TaskRequest) -> Result<ParsedResponse> {
        let prompts = self.prepare(request)?;

        tracing::info!(backend = self.backend.name(), "Executing completion request");
        let reply = self.backend.complete(
            &prompts.system,
            &prompts.user,
            self.temperature,
            self.max_tokens,
        )?;

        let parsed = parse_response(&reply)?;
        let summary = summarize(&parsed.patch);
        tracing::info!(files = ?summary.files, %summary, "Task execution complete");
        Ok(parsed)
    }

    /// Run every stage up to prompt assembly, without calling the backend.
    ///
    /// # Returns
    ///
    /// * `Ok(PromptPair)` - The prompts that `execute` would send
    /// * `Err(RunbookError::TaskNotFound | MalformedTask)` - Task resolution failed
    /// * `Err(RunbookError::MissingEnvironment)` - Required variables are unset
    /// * `Err(RunbookError::UserError)` - Context specs declared but no context root
    /// * `Err(RunbookError::MissingContext | MissingRepoFiles | InvalidSpecType)` - Aggregation failed
    pub fn prepare(&self, request: &TaskRequest) -> Result<PromptPair> {
        let task = TaskDefinition::resolve(
            &request.repo_root,
            request.context_root.as_deref(),
            &request.task_name,
        )?;
        tracing::info!(task = %request.task_name, source = %task.source.display(), "Loaded task");

        let environment = load_environment(&task, &self.environment)?;
        if !environment.is_empty() {
            tracing::info!(count = environment.len(), "Loaded environment variables for task");
        }
        let variables = VariableBinding::merged(environment, &request.variables);

        let context = self.aggregate(&task, request, &variables)?;

        let prompts = PromptAssembler::new(&request.repo_root)
            .with_structure_depth(self.structure_depth)
            .assemble(&task, &context, &variables);
        Ok(prompts)
    }

    fn aggregate(
        &self,
        task: &TaskDefinition,
        request: &TaskRequest,
        variables: &VariableBinding,
    ) -> Result<ResolvedContext> {
        let mut resolved = ResolvedContext::new();

        let context_specs = declared_specs("context", task.frontmatter.context.as_ref())?;
        if let Some(specs) = context_specs.filter(|specs| !specs.is_empty()) {
            let Some(context_root) = request.context_root.as_deref() else {
                return Err(RunbookError::UserError(format!(
                    "task '{}' requires context files but no context root is set (context: {})",
                    request.task_name,
                    specs.join(", ")
                )));
            };
            resolved.extend(context::resolve_context(context_root, &specs, Some(variables))?);
            tracing::info!(count = specs.len(), "Loaded context file paths");
        }

        let repo = context::aggregate(
            Source::Repo,
            &request.repo_root,
            task.frontmatter.repo.as_ref(),
            Some(variables),
        )?;
        if !repo.is_empty() {
            tracing::info!(count = repo.len(), "Loaded repo files");
        }
        resolved.extend(repo);

        if !resolved.is_empty() {
            tracing::info!(count = resolved.len(), "Total context files loaded");
        }
        Ok(resolved)
    }
}
