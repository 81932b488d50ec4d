//! Secrets resolver.
//!
//! Orchestrates the fallback chain for one environment: sops decryption,
//! plaintext fallback, schema validation, and memoization, plus the typed
//! views over the loaded document (dot-path lookup and env-var flattening).

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::core::constants;
use crate::core::document::Document;
use crate::core::environment;
use crate::core::runner::{CommandRunner, RunError, SystemRunner};
use crate::core::schema;
use crate::core::store::DocumentStore;
use crate::error::{Error, Result};

/// Resolves the secrets document for a single environment.
///
/// The environment is fixed at construction. The first successful load is
/// memoized for the instance's lifetime; failures are never cached, so a
/// later call retries the full pipeline. Instances share no state; use one
/// resolver per environment.
#[derive(Debug)]
pub struct Resolver<R = SystemRunner> {
    environment: String,
    store: DocumentStore,
    runner: R,
    cache: Option<Document>,
}

impl Resolver<SystemRunner> {
    /// Resolver for an environment, using the conventional `secrets/` layout
    /// and the real sops binary.
    pub fn new(environment: impl Into<String>) -> Self {
        Self::with(environment, DocumentStore::default(), SystemRunner)
    }

    /// Resolver for the selected environment.
    ///
    /// Selection precedence: non-empty explicit argument, `DEPLOY_ENV`,
    /// `ENVIRONMENT`, then `dev`. Never fails and performs no I/O.
    pub fn for_environment(explicit: Option<&str>) -> Self {
        Self::new(environment::select(explicit))
    }
}

impl<R: CommandRunner> Resolver<R> {
    /// Resolver with an injected store and runner.
    pub fn with(environment: impl Into<String>, store: DocumentStore, runner: R) -> Self {
        Self {
            environment: environment.into(),
            store,
            runner,
            cache: None,
        }
    }

    /// The environment this resolver is bound to.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Load, validate, and memoize the secrets document.
    ///
    /// The first call runs the full fallback chain (decrypt, plaintext,
    /// validate); subsequent calls on the same instance return the cached
    /// document without subprocess or file I/O.
    ///
    /// # Errors
    ///
    /// `Error::Load` for fatal decrypt/read/parse failures,
    /// `Error::RequiredSecretMissing` when a required path is absent or null.
    pub fn load(&mut self) -> Result<&Document> {
        let document = match self.cache.take() {
            Some(cached) => cached,
            None => {
                let document = self.fetch()?;
                schema::validate(&document)?;
                debug!(environment = %self.environment, "secrets loaded");
                document
            }
        };
        Ok(&*self.cache.insert(document))
    }

    /// Load the document, substituting the hard-coded default on any failure.
    ///
    /// The only operation guaranteed never to fail: every error is downgraded
    /// to a warning and the schema-shaped default document (empty leaves, the
    /// environment tag set to this resolver's environment) is returned. The
    /// default is not cached, so a later `load` retries for real.
    pub fn load_or_default(&mut self) -> Document {
        match self.load() {
            Ok(document) => document.clone(),
            Err(err) => {
                warn!(
                    environment = %self.environment,
                    error = %err,
                    "sops secrets loading failed, substituting default secrets"
                );
                schema::default_document(&self.environment)
            }
        }
    }

    /// Fetch a single secret by dot-delimited path.
    ///
    /// Loads the document first if needed, propagating load failures.
    ///
    /// # Errors
    ///
    /// `Error::SecretNotString` when the path is absent or resolves to a
    /// non-string value.
    pub fn get(&mut self, path: &str) -> Result<String> {
        let document = self.load()?;
        document
            .get_str(path)
            .map(str::to_string)
            .ok_or_else(|| Error::SecretNotString(path.to_string()))
    }

    /// Flatten the document into an environment-variable mapping.
    ///
    /// String leaves become `UPPER_SNAKE_CASE` keys joined with `_`;
    /// non-string leaves are omitted.
    pub fn export_env(&mut self) -> Result<BTreeMap<String, String>> {
        Ok(self.load()?.flatten())
    }

    /// Run the decrypt-or-fallback chain, without validation or caching.
    fn fetch(&self) -> Result<Document> {
        if self.runner.lookup(constants::SOPS_TOOL).is_none() {
            warn!(
                environment = %self.environment,
                "sops not found on PATH, falling back to plaintext secrets"
            );
            return self.read_plaintext();
        }

        let encrypted = self.store.encrypted_path(&self.environment);
        let encrypted_arg = encrypted.display().to_string();
        debug!(path = %encrypted_arg, "decrypting secrets");

        match self
            .runner
            .run(constants::SOPS_TOOL, &["-d", encrypted_arg.as_str()])
        {
            Ok(stdout) => self.parse(&stdout),
            Err(err) if err.is_not_encrypted() => {
                warn!(
                    environment = %self.environment,
                    "document is not encrypted, falling back to plaintext secrets"
                );
                self.read_plaintext()
            }
            Err(err) => Err(self.fatal(cause_of(&err))),
        }
    }

    fn read_plaintext(&self) -> Result<Document> {
        let text = self
            .store
            .read_plaintext(&self.environment)
            .map_err(|e| self.fatal(format!("Error: {e}")))?;
        self.parse(&text)
    }

    fn parse(&self, text: &str) -> Result<Document> {
        Document::parse(text).map_err(|e| self.fatal(format!("Error: {e}")))
    }

    fn fatal(&self, cause: String) -> Error {
        Error::Load {
            environment: self.environment.clone(),
            cause,
        }
    }
}

/// Stringify a tool failure for the fatal load message.
///
/// Spawn failures are structured errors and keep an `Error: message` shape;
/// stderr from a tool that ran is embedded verbatim rather than re-wrapped.
fn cause_of(err: &RunError) -> String {
    match err {
        RunError::Spawn { message, .. } => format!("Error: {message}"),
        RunError::Failed { stderr, .. } => stderr.clone(),
    }
}
