//! Converting every session under a projects directory.
//!
//! Sessions are independent and each writes only inside its own
//! `<output>/<project>/<session>/` directory, so they are converted in parallel. A failed
//! session is recorded in the report and never stops the others.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::TranscriptConfig;
use crate::discovery::find_all_sessions;
use crate::generator::generate_html;
use crate::models::ProjectInfo;
use crate::output::site::{create_dir, write_file};
use crate::output::templates::{master_index, project_index};
use crate::output::write_assets;
use crate::paginate::INDEX_FILE;
use crate::utils::safe_dir_name;

/// A session whose conversion failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSession {
    pub project: String,
    pub session: String,
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub total_projects: usize,
    /// Sessions converted successfully.
    pub total_sessions: usize,
    pub failed: Vec<FailedSession>,
    pub output_dir: PathBuf,
}

/// Output directory name for each project, made unique when display names collide.
fn project_dir_names(projects: &[ProjectInfo]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    projects
        .iter()
        .map(|project| {
            let base = safe_dir_name(&project.name);
            let mut name = base.clone();
            let mut suffix = 1;
            // A suffixed name may itself be a real project name, so keep going until free
            while taken.contains(&name) {
                suffix += 1;
                name = format!("{base}-{suffix}");
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Convert every session in `projects_dir` into `output_dir` and write the project and master
/// indexes.
pub fn generate_batch_html(
    projects_dir: &Path,
    output_dir: &Path,
    config: &TranscriptConfig,
) -> Result<BatchReport> {
    create_dir(output_dir)?;

    let projects = find_all_sessions(projects_dir, config.include_agents)?;
    let dir_names = project_dir_names(&projects);

    let jobs: Vec<(usize, usize, PathBuf)> = projects
        .iter()
        .enumerate()
        .flat_map(|(p, project)| {
            let project_dir = output_dir.join(&dir_names[p]);
            project.sessions.iter().enumerate().map(move |(s, session)| {
                (p, s, project_dir.join(safe_dir_name(&session.name())))
            })
        })
        .collect();

    info!(projects = projects.len(), sessions = jobs.len(), "Starting batch conversion");

    let failed: Vec<FailedSession> = jobs
        .par_iter()
        .filter_map(|(p, s, session_dir)| {
            let project = &projects[*p];
            let session = &project.sessions[*s];
            match generate_html(&session.path, session_dir, config) {
                Ok(_) => None,
                Err(e) => {
                    warn!(path = %session.path.display(), error = %e, "Failed to convert session");
                    Some(FailedSession {
                        project: project.name.clone(),
                        session: session.name(),
                        path: session.path.clone(),
                        error: e.to_string(),
                    })
                }
            }
        })
        .collect();

    for (project, dir_name) in projects.iter().zip(&dir_names) {
        let project_dir = output_dir.join(dir_name);
        create_dir(&project_dir)?;
        write_file(&project_dir.join(INDEX_FILE), project_index(project).as_bytes())
            .with_context(|| format!("Failed to write index for project {}", project.name))?;
    }

    write_file(&output_dir.join(INDEX_FILE), master_index(&projects, &dir_names).as_bytes())?;
    write_assets(output_dir)?;

    let report = BatchReport {
        total_projects: projects.len(),
        total_sessions: jobs.len() - failed.len(),
        failed,
        output_dir: output_dir.to_path_buf(),
    };
    info!(
        projects = report.total_projects,
        sessions = report.total_sessions,
        failed = report.failed.len(),
        "Batch conversion finished"
    );
    Ok(report)
}
