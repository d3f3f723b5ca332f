//! In-memory backend.
//!
//! Native objects live in an arena indexed by [`NativeId`]. The scheme list
//! is part of the backend itself; saving it captures a [`SavedSchemeList`]
//! and, when an output path is configured, writes it as pretty JSON.

use std::{
    fmt, fs,
    io::Write,
    iter,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;
use xcforge_model::{Platform, SchemeAction, Settings, TargetType};

use super::{Backend, BackendError, BackendResult, NativeId, SchemeList};
use crate::ModelNode;

/// A group in the native project navigator.
#[derive(Debug, Clone, Serialize)]
pub struct NativeGroup {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeProject {
    pub name: String,
    pub default_configuration: String,
    pub groups: Vec<NativeId>,
    pub targets: Vec<NativeId>,
    pub configurations: Vec<NativeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeTarget {
    pub name: String,
    /// Product type identifier, e.g. `com.apple.product-type.application`.
    pub product_type: &'static str,
    /// SDK root, e.g. `iphoneos`.
    pub sdk_root: &'static str,
    pub deployment_target: String,
    pub language: String,
    pub configurations: Vec<NativeId>,
    /// Targets this target depends on.
    pub dependencies: Vec<NativeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeConfiguration {
    pub name: String,
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NativeScheme {
    pub name: String,
    pub build_targets: Vec<NativeId>,
    pub launch_target: Option<NativeId>,
    pub test_targets: Vec<NativeId>,
    /// Build configuration per action, in the order they were set.
    pub actions: IndexMap<SchemeAction, String>,
}

/// An object in the in-memory graph.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NativeObject {
    Project(NativeProject),
    Group(NativeGroup),
    Target(NativeTarget),
    Configuration(NativeConfiguration),
    Scheme(NativeScheme),
}

impl NativeObject {
    pub fn kind(&self) -> &'static str {
        match self {
            NativeObject::Project(_) => "project",
            NativeObject::Group(_) => "group",
            NativeObject::Target(_) => "target",
            NativeObject::Configuration(_) => "configuration",
            NativeObject::Scheme(_) => "scheme",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NativeObject::Project(p) => &p.name,
            NativeObject::Group(g) => &g.name,
            NativeObject::Target(t) => &t.name,
            NativeObject::Configuration(c) => &c.name,
            NativeObject::Scheme(s) => &s.name,
        }
    }
}

/// A persisted scheme, with native references resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScheme {
    pub name: String,
    pub build_targets: Vec<String>,
    pub launch_target: Option<String>,
    pub test_targets: Vec<String>,
    pub actions: IndexMap<SchemeAction, String>,
}

/// The scheme list as written by [`SchemeList::save`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSchemeList {
    /// Targets whose default scheme is not generated, in suppression order.
    pub suppressed: Vec<String>,
    pub schemes: Vec<SavedScheme>,
}

impl SavedSchemeList {
    /// Read a scheme list written by the in-memory backend.
    pub fn read(path: impl AsRef<Path>) -> BackendResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl fmt::Display for SavedSchemeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suppressed.is_empty() {
            writeln!(f, "suppressed: (none)")?;
        } else {
            writeln!(f, "suppressed: {}", self.suppressed.join(", "))?;
        }
        for scheme in &self.schemes {
            writeln!(f, "scheme {}", scheme.name)?;
            writeln!(f, "  build: {}", scheme.build_targets.join(", "))?;
            if let Some(launch) = &scheme.launch_target {
                writeln!(f, "  launch: {}", launch)?;
            }
            if !scheme.test_targets.is_empty() {
                writeln!(f, "  test: {}", scheme.test_targets.join(", "))?;
            }
            let actions: Vec<String> = scheme
                .actions
                .iter()
                .map(|(action, configuration)| format!("{}={}", action, configuration))
                .collect();
            writeln!(f, "  actions: {}", actions.join(" "))?;
        }
        Ok(())
    }
}

/// A backend keeping the native object graph in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: Vec<NativeObject>,
    suppressed: IndexSet<NativeId>,
    schemes: Vec<NativeId>,
    saved: Option<SavedSchemeList>,
    save_count: usize,
    output: Option<PathBuf>,
}

impl MemoryBackend {
    /// Create a backend that keeps saved scheme lists in memory only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that also writes the scheme list to `path` on save.
    pub fn with_output(path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
            ..Self::default()
        }
    }

    /// Number of native objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: NativeId) -> Option<&NativeObject> {
        self.objects.get(id.index())
    }

    /// All objects with their ids, in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (NativeId, &NativeObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (NativeId::new(index as u32), object))
    }

    /// The first native project.
    pub fn project(&self) -> Option<&NativeProject> {
        self.objects.iter().find_map(|object| match object {
            NativeObject::Project(p) => Some(p),
            _ => None,
        })
    }

    pub fn group(&self, id: NativeId) -> Option<&NativeGroup> {
        match self.get(id)? {
            NativeObject::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn target(&self, id: NativeId) -> Option<&NativeTarget> {
        match self.get(id)? {
            NativeObject::Target(t) => Some(t),
            _ => None,
        }
    }

    pub fn configuration(&self, id: NativeId) -> Option<&NativeConfiguration> {
        match self.get(id)? {
            NativeObject::Configuration(c) => Some(c),
            _ => None,
        }
    }

    pub fn scheme(&self, id: NativeId) -> Option<&NativeScheme> {
        match self.get(id)? {
            NativeObject::Scheme(s) => Some(s),
            _ => None,
        }
    }

    pub fn find_target(&self, name: &str) -> Option<NativeId> {
        self.objects()
            .find(|(_, object)| matches!(object, NativeObject::Target(t) if t.name == name))
            .map(|(id, _)| id)
    }

    pub fn find_scheme(&self, name: &str) -> Option<NativeId> {
        self.objects()
            .find(|(_, object)| matches!(object, NativeObject::Scheme(s) if s.name == name))
            .map(|(id, _)| id)
    }

    /// Schemes currently in the scheme list, in insertion order.
    pub fn listed_schemes(&self) -> &[NativeId] {
        &self.schemes
    }

    pub fn is_suppressed(&self, target: NativeId) -> bool {
        self.suppressed.contains(&target)
    }

    /// Targets with suppressed default schemes, in suppression order.
    pub fn suppressed_targets(&self) -> impl Iterator<Item = NativeId> + '_ {
        self.suppressed.iter().copied()
    }

    /// The scheme list captured by the last save, if any.
    pub fn saved_scheme_list(&self) -> Option<&SavedSchemeList> {
        self.saved.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// The current scheme list with references resolved to names.
    pub fn snapshot(&self) -> SavedSchemeList {
        SavedSchemeList {
            suppressed: self.suppressed.iter().map(|id| self.name_of(*id)).collect(),
            schemes: self
                .schemes
                .iter()
                .filter_map(|id| self.scheme(*id))
                .map(|scheme| SavedScheme {
                    name: scheme.name.clone(),
                    build_targets: self.names_of(&scheme.build_targets),
                    launch_target: scheme.launch_target.map(|id| self.name_of(id)),
                    test_targets: self.names_of(&scheme.test_targets),
                    actions: scheme.actions.clone(),
                })
                .collect(),
        }
    }

    fn name_of(&self, id: NativeId) -> String {
        match self.get(id) {
            Some(object) => object.name().to_string(),
            None => id.to_string(),
        }
    }

    fn names_of(&self, ids: &[NativeId]) -> Vec<String> {
        ids.iter().map(|id| self.name_of(*id)).collect()
    }

    fn insert(&mut self, object: NativeObject) -> NativeId {
        let id = NativeId::new(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    fn object(&self, id: NativeId) -> BackendResult<&NativeObject> {
        self.objects
            .get(id.index())
            .ok_or(BackendError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: NativeId) -> BackendResult<&mut NativeObject> {
        self.objects
            .get_mut(id.index())
            .ok_or(BackendError::UnknownObject(id))
    }

    fn project_mut(&mut self, id: NativeId) -> BackendResult<&mut NativeProject> {
        match self.object_mut(id)? {
            NativeObject::Project(p) => Ok(p),
            other => Err(wrong_kind(id, "project", other)),
        }
    }

    fn configuration_mut(&mut self, id: NativeId) -> BackendResult<&mut NativeConfiguration> {
        match self.object_mut(id)? {
            NativeObject::Configuration(c) => Ok(c),
            other => Err(wrong_kind(id, "configuration", other)),
        }
    }

    fn scheme_mut(&mut self, id: NativeId) -> BackendResult<&mut NativeScheme> {
        match self.object_mut(id)? {
            NativeObject::Scheme(s) => Ok(s),
            other => Err(wrong_kind(id, "scheme", other)),
        }
    }

    fn ensure_target(&self, id: NativeId) -> BackendResult<()> {
        match self.object(id)? {
            NativeObject::Target(_) => Ok(()),
            other => Err(wrong_kind(id, "target", other)),
        }
    }
}

fn wrong_kind(id: NativeId, expected: &'static str, found: &NativeObject) -> BackendError {
    BackendError::WrongKind {
        id,
        expected,
        found: found.kind(),
    }
}

fn product_type(target_type: &TargetType) -> BackendResult<&'static str> {
    match target_type {
        TargetType::Application => Ok("com.apple.product-type.application"),
        TargetType::UnitTestBundle => Ok("com.apple.product-type.bundle.unit-test"),
        TargetType::Framework => Ok("com.apple.product-type.framework"),
        TargetType::StaticLibrary => Ok("com.apple.product-type.library.static"),
        TargetType::Other(tag) => Err(BackendError::Unrepresentable {
            reason: format!("unsupported product type '{}'", tag),
        }),
    }
}

fn sdk_root(platform: Platform) -> &'static str {
    match platform {
        Platform::Ios => "iphoneos",
        Platform::Macos => "macosx",
        Platform::Tvos => "appletvos",
        Platform::Watchos => "watchos",
    }
}

impl Backend for MemoryBackend {
    fn create(&mut self, node: ModelNode<'_>) -> BackendResult<NativeId> {
        let object = match node {
            ModelNode::Project(project) => NativeObject::Project(NativeProject {
                name: project.name.clone(),
                default_configuration: project.default_build_configuration.clone(),
                groups: Vec::new(),
                targets: Vec::new(),
                configurations: Vec::new(),
            }),
            ModelNode::Configuration(configuration) => {
                NativeObject::Configuration(NativeConfiguration {
                    name: configuration.name.clone(),
                    settings: Settings::new(),
                })
            }
            ModelNode::Target(target) => NativeObject::Target(NativeTarget {
                name: target.name.clone(),
                product_type: product_type(&target.target_type)?,
                sdk_root: sdk_root(target.platform),
                deployment_target: target.deployment_target.clone(),
                language: target.language.to_string(),
                configurations: Vec::new(),
                dependencies: Vec::new(),
            }),
            ModelNode::Scheme(_) => NativeObject::Scheme(NativeScheme::default()),
        };
        Ok(self.insert(object))
    }

    fn create_group(&mut self, project: NativeId, name: &str) -> BackendResult<NativeId> {
        self.project_mut(project)?;
        let group = self.insert(NativeObject::Group(NativeGroup {
            name: name.to_string(),
        }));
        self.project_mut(project)?.groups.push(group);
        Ok(group)
    }

    fn attach(&mut self, parent: NativeId, child: NativeId) -> BackendResult<()> {
        let child_kind = self.object(child)?.kind();
        let parent_object = self.object_mut(parent)?;
        let parent_kind = parent_object.kind();
        let invalid = BackendError::InvalidAttachment {
            parent: parent_kind,
            child: child_kind,
        };
        if parent == child {
            return Err(invalid);
        }

        let list = match (parent_object, child_kind) {
            (NativeObject::Project(p), "group") => &mut p.groups,
            (NativeObject::Project(p), "target") => &mut p.targets,
            (NativeObject::Project(p), "configuration") => &mut p.configurations,
            (NativeObject::Target(t), "configuration") => &mut t.configurations,
            (NativeObject::Target(t), "target") => &mut t.dependencies,
            _ => return Err(invalid),
        };
        if !list.contains(&child) {
            list.push(child);
        }
        Ok(())
    }

    fn set_build_settings(
        &mut self,
        configuration: NativeId,
        settings: &Settings,
    ) -> BackendResult<()> {
        self.configuration_mut(configuration)?.settings = settings.clone();
        Ok(())
    }

    fn set_scheme_name(&mut self, scheme: NativeId, name: &str) -> BackendResult<()> {
        self.scheme_mut(scheme)?.name = name.to_string();
        Ok(())
    }

    fn configure_scheme_with_targets(
        &mut self,
        scheme: NativeId,
        target: NativeId,
        test_target: Option<NativeId>,
    ) -> BackendResult<()> {
        self.ensure_target(target)?;
        if let Some(test_target) = test_target {
            self.ensure_target(test_target)?;
        }

        let scheme = self.scheme_mut(scheme)?;
        scheme.build_targets = iter::once(target).chain(test_target).collect();
        scheme.launch_target = Some(target);
        scheme.test_targets = test_target.into_iter().collect();
        Ok(())
    }

    fn set_action_configuration(
        &mut self,
        scheme: NativeId,
        action: SchemeAction,
        configuration: &str,
    ) -> BackendResult<()> {
        self.scheme_mut(scheme)?
            .actions
            .insert(action, configuration.to_string());
        Ok(())
    }

    fn scheme_list(&mut self) -> &mut dyn SchemeList {
        self
    }
}

impl SchemeList for MemoryBackend {
    fn suppress_autocreation_of_target(&mut self, target: NativeId) {
        self.suppressed.insert(target);
    }

    fn push(&mut self, scheme: NativeId) {
        self.schemes.push(scheme);
    }

    fn save(&mut self) -> BackendResult<()> {
        let snapshot = self.snapshot();

        if let Some(path) = &self.output {
            write_atomically(path, &serde_json::to_string_pretty(&snapshot)?)?;
            debug!(path = %path.display(), "wrote scheme list");
        }

        self.saved = Some(snapshot);
        self.save_count += 1;
        Ok(())
    }
}

/// Write `content` to a temporary file next to `path`, then rename it into
/// place. Readers see either the old file or the complete new one.
fn write_atomically(path: &Path, content: &str) -> BackendResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(|source| BackendError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
