//! Compilation units and their dependencies

use std::fmt;

use serde::Serialize;

/// `group:artifact:version` coordinates of a published artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactCoordinates {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ArtifactCoordinates {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// How a dependency is exposed to a compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyScope {
    /// Needed to compile and at runtime, not re-exported
    Implementation,
    /// Needed to compile only
    CompileOnly,
    /// Needed at runtime only
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dependency {
    pub coordinates: ArtifactCoordinates,
    pub scope: DependencyScope,
}

/// One compilation a build wants to run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompilationUnit {
    pub name: String,
    dependencies: Vec<Dependency>,
    requested_plugins: Vec<String>,
}

impl CompilationUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a dependency; returns false if it was already present
    pub fn add_dependency(
        &mut self,
        coordinates: ArtifactCoordinates,
        scope: DependencyScope,
    ) -> bool {
        let dependency = Dependency { coordinates, scope };
        if self.dependencies.contains(&dependency) {
            return false;
        }
        self.dependencies.push(dependency);
        true
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn has_dependency(
        &self,
        coordinates: &ArtifactCoordinates,
        scope: DependencyScope,
    ) -> bool {
        self.dependencies
            .iter()
            .any(|d| &d.coordinates == coordinates && d.scope == scope)
    }

    /// Ask the compiler to attach the plugin with `id`
    pub fn request_plugin(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.requested_plugins.contains(&id) {
            self.requested_plugins.push(id);
        }
    }

    /// Plugin ids the compiler must attach, in request order
    pub fn requested_plugins(&self) -> &[String] {
        &self.requested_plugins
    }
}
