//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a single session record (one JSONL line)
#[derive(Clone)]
pub struct RecordBuilder {
    record_type: String,
    role: String,
    content: Value,
    timestamp: Option<String>,
    cwd: Option<String>,
    is_meta: bool,
    is_compact_summary: bool,
}

impl RecordBuilder {
    fn new(record_type: &str, role: &str, content: Value) -> Self {
        Self {
            record_type: record_type.to_string(),
            role: role.to_string(),
            content,
            timestamp: None,
            cwd: None,
            is_meta: false,
            is_compact_summary: false,
        }
    }

    /// A user prompt with plain string content
    pub fn user(text: &str) -> Self {
        Self::new("user", "user", Value::String(text.to_string()))
    }

    /// An assistant message with one text block
    pub fn assistant(text: &str) -> Self {
        Self::new("assistant", "assistant", json!([{"type": "text", "text": text}]))
    }

    /// An assistant message calling a tool
    pub fn tool_use(id: &str, name: &str, input: Value) -> Self {
        Self::new(
            "assistant",
            "assistant",
            json!([{"type": "tool_use", "id": id, "name": name, "input": input}]),
        )
    }

    /// A user record carrying a tool result back to the model
    pub fn tool_result(tool_use_id: &str, output: &str) -> Self {
        Self::new(
            "user",
            "user",
            json!([{"type": "tool_result", "tool_use_id": tool_use_id, "content": output}]),
        )
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn meta(mut self) -> Self {
        self.is_meta = true;
        self
    }

    pub fn compact_summary(mut self) -> Self {
        self.is_compact_summary = true;
        self
    }

    pub fn to_json(&self) -> String {
        let mut record = json!({
            "type": self.record_type,
            "message": {"role": self.role, "content": self.content},
        });
        if let Some(ts) = &self.timestamp {
            record["timestamp"] = json!(ts);
        }
        if let Some(cwd) = &self.cwd {
            record["cwd"] = json!(cwd);
        }
        if self.is_meta {
            record["isMeta"] = json!(true);
        }
        if self.is_compact_summary {
            record["isCompactSummary"] = json!(true);
        }
        record.to_string()
    }
}

/// Builder for a session file in a temporary directory
pub struct SessionFileBuilder {
    lines: Vec<String>,
}

impl SessionFileBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    pub fn records(mut self, records: impl IntoIterator<Item = RecordBuilder>) -> Self {
        self.lines.extend(records.into_iter().map(|r| r.to_json()));
        self
    }

    /// Append a raw line verbatim (may be invalid JSON)
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn contents(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Write the session as `<dir>/<name>` and return its path
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.contents()).expect("Failed to write session file");
        path
    }

    /// Write into a fresh temp dir as `session.jsonl`
    pub fn build(&self) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = self.write_to(temp_dir.path(), "session.jsonl");
        (temp_dir, path)
    }
}

impl Default for SessionFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a `~/.claude/projects`-style directory tree
pub struct ProjectsDirBuilder {
    temp_dir: TempDir,
}

impl ProjectsDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("projects")).expect("Failed to create projects dir");
        Self { temp_dir }
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.temp_dir.path().join("projects")
    }

    /// Add a session file `<folder>/<file_name>`, creating the project folder as needed
    pub fn with_session(self, folder: &str, file_name: &str, session: &SessionFileBuilder) -> Self {
        let project_dir = self.projects_dir().join(folder);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        session.write_to(&project_dir, file_name);
        self
    }

    /// Add a file with arbitrary contents
    pub fn with_raw_session(self, folder: &str, file_name: &str, contents: &str) -> Self {
        let project_dir = self.projects_dir().join(folder);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        fs::write(project_dir.join(file_name), contents).expect("Failed to write session");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ProjectsDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A short realistic session: three prompts with a tool call and a commit
pub fn realistic_session() -> SessionFileBuilder {
    SessionFileBuilder::new().records([
        RecordBuilder::user("Add a login page")
            .timestamp("2025-01-01T10:00:00Z")
            .cwd("/home/dev/app"),
        RecordBuilder::tool_use(
            "toolu_1",
            "Write",
            json!({"file_path": "/home/dev/app/src/login.rs", "content": "fn login() {}"}),
        )
        .timestamp("2025-01-01T10:00:05Z"),
        RecordBuilder::tool_result("toolu_1", "File created").timestamp("2025-01-01T10:00:06Z"),
        RecordBuilder::assistant("Created **login.rs**").timestamp("2025-01-01T10:00:07Z"),
        RecordBuilder::user("Commit it").timestamp("2025-01-01T10:01:00Z"),
        RecordBuilder::tool_use("toolu_2", "Bash", json!({"command": "git commit -am 'Add login'"}))
            .timestamp("2025-01-01T10:01:05Z"),
        RecordBuilder::tool_result("toolu_2", "[main 1a2b3c4] Add login\n 1 file changed")
            .timestamp("2025-01-01T10:01:06Z"),
        RecordBuilder::user("Thanks").timestamp("2025-01-01T10:02:00Z"),
        RecordBuilder::assistant("You're welcome").timestamp("2025-01-01T10:02:01Z"),
    ])
}

/// Read a generated file to a string
pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.as_ref().display()))
}
