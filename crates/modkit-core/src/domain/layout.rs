//! Module layouts: which source root, which build-file name, which manifest
//! and which default templates a generated module tree uses.
//!
//! A layout is a single configuration value. The built-in presets cover the
//! common Gradle setups; custom layouts are loaded by the adapters crate from
//! TOML and validated through [`ModuleLayout::validate`].

use serde::Serialize;

use crate::domain::{error::DomainError, value_objects::ModuleKind};

/// Name of the layout used when none is selected.
pub const DEFAULT_LAYOUT: &str = "kmp";

/// Default build-file template per module kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutTemplates {
    pub public: String,
    #[serde(rename = "impl")]
    pub implementation: String,
    pub testing: String,
}

impl LayoutTemplates {
    pub fn get(&self, kind: ModuleKind) -> &str {
        match kind {
            ModuleKind::Public => &self.public,
            ModuleKind::Impl => &self.implementation,
            ModuleKind::Testing => &self.testing,
        }
    }
}

/// Directory and file conventions for generated modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleLayout {
    name: String,
    description: String,
    source_root: Vec<String>,
    build_file: String,
    manifest_file: String,
    templates: LayoutTemplates,
}

impl ModuleLayout {
    /// Create and validate a layout.
    ///
    /// `source_root` is a `/`-separated relative path such as `src/main/kotlin`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        source_root: &str,
        build_file: impl Into<String>,
        manifest_file: impl Into<String>,
        templates: LayoutTemplates,
    ) -> Result<Self, DomainError> {
        let layout = Self {
            name: name.into(),
            description: description.into(),
            source_root: source_root
                .split(['/', '\\'])
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            build_file: build_file.into(),
            manifest_file: manifest_file.into(),
            templates,
        };
        layout.validate()?;

        // A leading separator makes the root absolute even though the empty
        // segment was filtered out above.
        if source_root.starts_with(['/', '\\']) {
            return Err(layout.invalid("source root must be relative"));
        }

        Ok(layout)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Source-root directories, outermost first.
    pub fn source_root(&self) -> &[String] {
        &self.source_root
    }

    /// Source root joined with `/`, for display.
    pub fn source_root_display(&self) -> String {
        self.source_root.join("/")
    }

    pub fn build_file(&self) -> &str {
        &self.build_file
    }

    pub fn manifest_file(&self) -> &str {
        &self.manifest_file
    }

    pub fn templates(&self) -> &LayoutTemplates {
        &self.templates
    }

    /// Default template for `kind`.
    pub fn template(&self, kind: ModuleKind) -> &str {
        self.templates.get(kind)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.name.chars().any(char::is_whitespace) {
            return Err(self.invalid("name must be a non-empty word"));
        }
        if self.source_root.is_empty() {
            return Err(self.invalid("source root cannot be empty"));
        }
        if self.source_root.iter().any(|s| s == ".." || s == "." || s.contains(':')) {
            return Err(self.invalid("source root must be a plain relative path"));
        }
        for (what, file) in [("build file", &self.build_file), ("manifest file", &self.manifest_file)] {
            if file.trim().is_empty() {
                return Err(self.invalid(&format!("{what} name cannot be empty")));
            }
            if file.contains(['/', '\\']) {
                return Err(self.invalid(&format!("{what} name cannot contain separators")));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> DomainError {
        DomainError::InvalidLayout {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    // ── Presets ───────────────────────────────────────────────────────────────

    /// All built-in layouts. The first one is the default.
    pub fn builtin() -> Vec<ModuleLayout> {
        vec![
            Self::kotlin_multiplatform(),
            Self::kotlin_jvm(),
            Self::android_library(),
        ]
    }

    /// Look up a built-in layout by name.
    pub fn builtin_named(name: &str) -> Result<ModuleLayout, DomainError> {
        Self::builtin()
            .into_iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DomainError::UnknownLayout(name.to_string()))
    }

    /// Kotlin Multiplatform modules (`src/commonMain/kotlin`).
    pub fn kotlin_multiplatform() -> Self {
        Self::preset(
            DEFAULT_LAYOUT,
            "Kotlin Multiplatform modules (jvm + js)",
            &["src", "commonMain", "kotlin"],
            LayoutTemplates {
                public: presets::KMP_PUBLIC.into(),
                implementation: presets::KMP_IMPL.into(),
                testing: presets::KMP_TESTING.into(),
            },
        )
    }

    /// Kotlin/JVM modules (`src/main/kotlin`).
    pub fn kotlin_jvm() -> Self {
        Self::preset(
            "jvm",
            "Kotlin/JVM library modules",
            &["src", "main", "kotlin"],
            LayoutTemplates {
                public: presets::JVM_PUBLIC.into(),
                implementation: presets::JVM_IMPL.into(),
                testing: presets::JVM_TESTING.into(),
            },
        )
    }

    /// Android library modules (`src/main/kotlin`, namespace from `$namespace`).
    pub fn android_library() -> Self {
        Self::preset(
            "android",
            "Android library modules",
            &["src", "main", "kotlin"],
            LayoutTemplates {
                public: presets::ANDROID_PUBLIC.into(),
                implementation: presets::ANDROID_IMPL.into(),
                testing: presets::ANDROID_TESTING.into(),
            },
        )
    }

    fn preset(name: &str, description: &str, root: &[&str], templates: LayoutTemplates) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            source_root: root.iter().map(|s| s.to_string()).collect(),
            build_file: "build.gradle.kts".into(),
            manifest_file: "settings.gradle.kts".into(),
            templates,
        }
    }
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self::kotlin_multiplatform()
    }
}

mod presets {
    pub const KMP_PUBLIC: &str = r#"plugins {
    kotlin("multiplatform")
}

kotlin {
    jvm()
    js(IR) {
        browser()
        nodejs()
    }

    sourceSets {
        val commonMain by getting {
            dependencies {
                // Public module dependencies
            }
        }
        val commonTest by getting {
            dependencies {
                implementation(kotlin("test"))
            }
        }
    }
}
"#;

    pub const KMP_IMPL: &str = r#"plugins {
    kotlin("multiplatform")
}

kotlin {
    jvm()
    js(IR) {
        browser()
        nodejs()
    }

    sourceSets {
        val commonMain by getting {
            dependencies {
                implementation(project("$projectDirectory:$directoryName:public"))
                // Implementation module dependencies
            }
        }
        val commonTest by getting {
            dependencies {
                implementation(kotlin("test"))
            }
        }
    }
}
"#;

    pub const KMP_TESTING: &str = r#"plugins {
    kotlin("multiplatform")
}

kotlin {
    jvm()
    js(IR) {
        browser()
        nodejs()
    }

    sourceSets {
        val commonMain by getting {
            dependencies {
                implementation(project("$projectDirectory:$directoryName:public"))
                implementation(project("$projectDirectory:$directoryName:impl"))
                // Testing module dependencies
                implementation(kotlin("test"))
            }
        }
        val commonTest by getting {
            dependencies {
                implementation(kotlin("test"))
            }
        }
    }
}
"#;

    pub const JVM_PUBLIC: &str = r#"plugins {
    kotlin("jvm")
}

dependencies {
    // Public module dependencies
    testImplementation(kotlin("test"))
}
"#;

    pub const JVM_IMPL: &str = r#"plugins {
    kotlin("jvm")
}

dependencies {
    implementation(project("$projectDirectory:$directoryName:public"))
    // Implementation module dependencies
    testImplementation(kotlin("test"))
}
"#;

    pub const JVM_TESTING: &str = r#"plugins {
    kotlin("jvm")
}

dependencies {
    implementation(project("$projectDirectory:$directoryName:public"))
    implementation(project("$projectDirectory:$directoryName:impl"))
    // Testing module dependencies
    implementation(kotlin("test"))
}
"#;

    pub const ANDROID_PUBLIC: &str = r#"plugins {
    id("com.android.library")
    kotlin("android")
}

android {
    namespace = "$namespace.api"
    compileSdk = 35

    defaultConfig {
        minSdk = 24
    }
}

dependencies {
    // Public module dependencies
    testImplementation(kotlin("test"))
}
"#;

    pub const ANDROID_IMPL: &str = r#"plugins {
    id("com.android.library")
    kotlin("android")
}

android {
    namespace = "$namespace.impl"
    compileSdk = 35

    defaultConfig {
        minSdk = 24
    }
}

dependencies {
    implementation(project("$projectDirectory:$directoryName:public"))
    // Implementation module dependencies
    testImplementation(kotlin("test"))
}
"#;

    pub const ANDROID_TESTING: &str = r#"plugins {
    id("com.android.library")
    kotlin("android")
}

android {
    namespace = "$namespace.testing"
    compileSdk = 35

    defaultConfig {
        minSdk = 24
    }
}

dependencies {
    implementation(project("$projectDirectory:$directoryName:public"))
    implementation(project("$projectDirectory:$directoryName:impl"))
    // Testing module dependencies
    implementation(kotlin("test"))
}
"#;
}
