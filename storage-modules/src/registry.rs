use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{ModuleClient, Visibility};
use crate::error::{ModuleError, Result};
use crate::hints::DataHint;

/// Type-erased surface a module publishes to the application.
pub type Exports = Arc<dyn Any + Send + Sync>;

/// What happens when a module name is defined a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedefinePolicy {
    /// Fail with [`ModuleError::AlreadyDefined`] without calling the builder.
    #[default]
    Reject,
    /// Call the builder and replace the previous descriptor.
    Replace,
}

/// Value returned by a module builder.
#[derive(Clone, Default)]
pub struct ModuleDefinition {
    pub exports: Option<Exports>,
    pub data_hints: BTreeMap<String, String>,
}

impl ModuleDefinition {
    pub fn new<T: Any + Send + Sync>(exports: T) -> Self {
        Self::from_shared(Arc::new(exports))
    }

    pub fn from_shared(exports: Exports) -> Self {
        Self {
            exports: Some(exports),
            data_hints: BTreeMap::new(),
        }
    }

    pub fn with_hint(mut self, key: &str, description: &str) -> Self {
        self.data_hints.insert(key.into(), description.into());
        self
    }
}

impl fmt::Debug for ModuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDefinition")
            .field("has_exports", &self.exports.is_some())
            .field("data_hints", &self.data_hints)
            .finish()
    }
}

/// A defined module, as stored in the registry.
#[derive(Clone)]
pub struct ModuleDescriptor {
    name: String,
    exports: Exports,
    data_hints: BTreeMap<String, String>,
}

impl ModuleDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exports(&self) -> &Exports {
        &self.exports
    }

    /// Downcast the exports to the type the module published.
    pub fn exports_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.exports).downcast::<T>().ok()
    }

    pub fn data_hints(&self) -> &BTreeMap<String, String> {
        &self.data_hints
    }

    pub fn parsed_hints(&self) -> Vec<(DataHint, &str)> {
        self.data_hints
            .iter()
            .map(|(key, description)| (DataHint::parse(key), description.as_str()))
            .collect()
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("data_hints", &self.data_hints)
            .finish_non_exhaustive()
    }
}

/// Registry of defined modules, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleDescriptor>,
    redefine: RedefinePolicy,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_redefine_policy(redefine: RedefinePolicy) -> Self {
        Self {
            modules: HashMap::new(),
            redefine,
        }
    }

    pub fn redefine_policy(&self) -> RedefinePolicy {
        self.redefine
    }

    /// Define a module.
    ///
    /// `builder` runs immediately with a private and a public client bound to
    /// the module's namespace. Nothing is stored if the name is invalid, the
    /// module exists under [`RedefinePolicy::Reject`], or the builder returns
    /// no exports.
    pub fn define<F>(&mut self, name: &str, builder: F) -> Result<&ModuleDescriptor>
    where
        F: FnOnce(ModuleClient, ModuleClient) -> ModuleDefinition,
    {
        validate_name(name)?;
        if self.redefine == RedefinePolicy::Reject && self.modules.contains_key(name) {
            return Err(ModuleError::AlreadyDefined(name.into()));
        }

        debug!(module = name, "defining module");
        let definition = builder(
            ModuleClient::new(name, Visibility::Private),
            ModuleClient::new(name, Visibility::Public),
        );
        let Some(exports) = definition.exports else {
            return Err(ModuleError::MissingExports(name.into()));
        };
        let descriptor = ModuleDescriptor {
            name: name.into(),
            exports,
            data_hints: definition.data_hints,
        };

        let stored = match self.modules.entry(name.into()) {
            Entry::Occupied(mut entry) => {
                warn!(module = name, "replacing previously defined module");
                entry.insert(descriptor);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(descriptor),
        };
        debug!(
            module = name,
            hints = stored.data_hints.len(),
            "module defined"
        );
        Ok(stored)
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    pub fn exports<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get(name).and_then(ModuleDescriptor::exports_as)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Names of all defined modules, in no particular order.
    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Forget every module. The redefinition policy is kept.
    pub fn clear(&mut self) {
        self.modules.clear();
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ModuleError::InvalidName {
            name: name.into(),
            reason: "name must not be empty".into(),
        });
    }
    if name.contains('/') {
        return Err(ModuleError::InvalidName {
            name: name.into(),
            reason: "name must not contain '/'".into(),
        });
    }
    if name == "." || name == ".." {
        return Err(ModuleError::InvalidName {
            name: name.into(),
            reason: "name must not be '.' or '..'".into(),
        });
    }
    if !name.chars().all(|c| c.is_ascii_lowercase()) {
        warn!(module = name, "module names should be lowercase a-z");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Contacts {
        base: String,
        public_base: String,
    }

    fn contacts_builder(private: ModuleClient, public: ModuleClient) -> ModuleDefinition {
        ModuleDefinition::new(Contacts {
            base: private.base_path().into(),
            public_base: public.base_path().into(),
        })
        .with_hint("objectType contact", "a vCard-like contact")
    }

    #[test]
    fn test_define_and_lookup() {
        let mut reg = ModuleRegistry::new();
        reg.define("contacts", contacts_builder).unwrap();

        let info = reg.get("contacts").unwrap();
        assert_eq!(info.name(), "contacts");
        assert_eq!(
            info.data_hints().get("objectType contact").map(String::as_str),
            Some("a vCard-like contact")
        );
        assert!(reg.get("documents").is_none());
    }

    #[test]
    fn test_builder_receives_namespaced_clients() {
        let mut reg = ModuleRegistry::new();
        reg.define("contacts", contacts_builder).unwrap();

        let exports = reg.exports::<Contacts>("contacts").unwrap();
        assert_eq!(
            *exports,
            Contacts {
                base: "/contacts/".into(),
                public_base: "/public/contacts/".into(),
            }
        );
    }

    #[test]
    fn test_exports_wrong_type() {
        let mut reg = ModuleRegistry::new();
        reg.define("contacts", contacts_builder).unwrap();
        assert!(reg.exports::<String>("contacts").is_none());
        assert!(reg.exports::<Contacts>("unknown").is_none());
    }

    #[test]
    fn test_descriptor_keeps_exports_handle() {
        let shared: Exports = Arc::new(42_u32);
        let mut reg = ModuleRegistry::new();
        reg.define("counter", |_, _| ModuleDefinition::from_shared(Arc::clone(&shared)))
            .unwrap();
        assert!(Arc::ptr_eq(reg.get("counter").unwrap().exports(), &shared));
    }

    #[test]
    fn test_missing_exports_rejected() {
        let mut reg = ModuleRegistry::new();
        let err = reg
            .define("broken", |_, _| ModuleDefinition::default())
            .unwrap_err();
        assert!(matches!(err, ModuleError::MissingExports(ref name) if name == "broken"));
        assert!(!reg.contains("broken"));
    }

    #[test]
    fn test_duplicate_rejection() {
        let mut reg = ModuleRegistry::new();
        reg.define("dup", |_, _| ModuleDefinition::new(1_u8)).unwrap();

        let mut called = false;
        let err = reg
            .define("dup", |_, _| {
                called = true;
                ModuleDefinition::new(2_u8)
            })
            .unwrap_err();
        assert!(err.to_string().contains("already defined"));
        assert!(!called);
        assert_eq!(*reg.exports::<u8>("dup").unwrap(), 1);
    }

    #[test]
    fn test_duplicate_replace_policy() {
        let mut reg = ModuleRegistry::with_redefine_policy(RedefinePolicy::Replace);
        reg.define("dup", |_, _| ModuleDefinition::new(1_u8)).unwrap();
        reg.define("dup", |_, _| ModuleDefinition::new(2_u8)).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(*reg.exports::<u8>("dup").unwrap(), 2);
    }

    #[test]
    fn test_invalid_names() {
        let mut reg = ModuleRegistry::new();
        assert!(matches!(
            reg.define("", |_, _| ModuleDefinition::new(())),
            Err(ModuleError::InvalidName { .. })
        ));
        assert!(matches!(
            reg.define("a/b", |_, _| ModuleDefinition::new(())),
            Err(ModuleError::InvalidName { .. })
        ));
        for dots in [".", ".."] {
            let mut called = false;
            let err = reg
                .define(dots, |_, _| {
                    called = true;
                    ModuleDefinition::new(())
                })
                .unwrap_err();
            assert!(matches!(err, ModuleError::InvalidName { ref name, .. } if name == dots));
            assert!(!called);
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn test_module_names_and_clear() {
        let mut reg = ModuleRegistry::new();
        reg.define("a", |_, _| ModuleDefinition::new(())).unwrap();
        reg.define("b", |_, _| ModuleDefinition::new(())).unwrap();

        let mut names = reg.module_names();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);

        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.redefine_policy(), RedefinePolicy::Reject);
    }

    #[test]
    fn test_parsed_hints() {
        let mut reg = ModuleRegistry::new();
        reg.define("messages", |_, _| {
            ModuleDefinition::new(())
                .with_hint("objectType message", "an email")
                .with_hint("string message#subject", "subject line")
        })
        .unwrap();

        let hints = reg.get("messages").unwrap().parsed_hints();
        assert_eq!(hints.len(), 2);
        assert_eq!(
            hints[0],
            (
                DataHint::ObjectType {
                    name: "message".into()
                },
                "an email"
            )
        );
    }

    #[test]
    fn test_redefine_policy_serialization() {
        let json = serde_json::to_string(&RedefinePolicy::Replace).unwrap();
        assert_eq!(json, "\"replace\"");
        let parsed: RedefinePolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, RedefinePolicy::Reject);
    }
}
