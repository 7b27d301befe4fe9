/// Batch conversion of a whole projects directory
mod common;

use claude_code_transcripts::{TranscriptConfig, generate_batch_html};
use common::{ProjectsDirBuilder, RecordBuilder, SessionFileBuilder, read, realistic_session};

#[test]
fn test_batch_converts_every_project() {
    let projects = ProjectsDirBuilder::new()
        .with_session("-home-user-projects-webapp", "session-a.jsonl", &realistic_session())
        .with_session(
            "-home-user-projects-webapp",
            "session-b.jsonl",
            &SessionFileBuilder::new().record(RecordBuilder::user("Second session")),
        )
        .with_session(
            "-home-user-cli-tool",
            "session-c.jsonl",
            &SessionFileBuilder::new().record(RecordBuilder::user("Other project")),
        );
    let out = projects.path().join("archive");

    let report = generate_batch_html(&projects.projects_dir(), &out, &TranscriptConfig::default())
        .unwrap();

    assert_eq!(report.total_projects, 2);
    assert_eq!(report.total_sessions, 3);
    assert!(report.failed.is_empty());

    assert!(out.join("webapp/session-a/index.html").exists());
    assert!(out.join("webapp/session-a/page-001.html").exists());
    assert!(out.join("webapp/session-b/index.html").exists());
    assert!(out.join("cli-tool/session-c/index.html").exists());
    assert!(out.join("styles.css").exists());

    let master = read(out.join("index.html"));
    assert!(master.contains(r#"href="webapp/index.html""#));
    assert!(master.contains(r#"href="cli-tool/index.html""#));
    assert!(master.contains("2 sessions"));

    let project = read(out.join("webapp/index.html"));
    assert!(project.contains(r#"href="session-a/index.html""#));
    assert!(project.contains("Add a login page"));
    assert!(project.contains("../styles.css"));
}

#[test]
fn test_batch_failed_session_does_not_stop_others() {
    let projects = ProjectsDirBuilder::new()
        .with_session("-home-user-app", "good.jsonl", &realistic_session())
        .with_raw_session("-home-user-app", "bad.jsonl", "this is not json\nnor is this\n");
    let out = projects.path().join("archive");

    let report = generate_batch_html(&projects.projects_dir(), &out, &TranscriptConfig::default())
        .unwrap();

    assert_eq!(report.total_sessions, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].session, "bad");
    assert!(report.failed[0].error.contains("bad.jsonl"));
    assert!(out.join("app/good/index.html").exists());
    assert!(!out.join("app/bad/index.html").exists());
}

#[test]
fn test_batch_agent_sessions_opt_in() {
    let build = || {
        ProjectsDirBuilder::new()
            .with_session("-home-user-app", "main.jsonl", &realistic_session())
            .with_session(
                "-home-user-app",
                "agent-1234.jsonl",
                &SessionFileBuilder::new().record(RecordBuilder::user("sub task")),
            )
    };

    let without = build();
    let out = without.path().join("archive");
    let report =
        generate_batch_html(&without.projects_dir(), &out, &TranscriptConfig::default()).unwrap();
    assert_eq!(report.total_sessions, 1);
    assert!(!out.join("app/agent-1234").exists());

    let with = build();
    let out = with.path().join("archive");
    let config = TranscriptConfig::default().with_include_agents(true);
    let report = generate_batch_html(&with.projects_dir(), &out, &config).unwrap();
    assert_eq!(report.total_sessions, 2);
    assert!(out.join("app/agent-1234/index.html").exists());
}

#[test]
fn test_batch_empty_projects_directory() {
    let projects = ProjectsDirBuilder::new();
    let out = projects.path().join("archive");

    let report = generate_batch_html(&projects.projects_dir(), &out, &TranscriptConfig::default())
        .unwrap();

    assert_eq!(report.total_projects, 0);
    assert!(read(out.join("index.html")).contains("No projects found."));
}
