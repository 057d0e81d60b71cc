//! Local git remotes for end-to-end tests
//!
//! Every remote is a bare repository under the fixture's temp directory whose
//! `HEAD` points at `main`, fed from a private seed clone.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Whether a usable `git` is on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run git in `dir` with a fixed identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Superdev Tests",
            "-c",
            "user.email=tests@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("Failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Commit `contents` to `file` in an existing checkout.
pub fn commit_file(checkout: &Path, file: &str, contents: &str) {
    std::fs::write(checkout.join(file), contents).expect("Failed to write file");
    git(checkout, &["add", file]);
    git(checkout, &["commit", "-q", "-m", &format!("Update {}", file)]);
}

pub struct GitFixture {
    pub temp_dir: TempDir,
}

impl GitFixture {
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        };
        std::fs::create_dir_all(fixture.remotes_dir()).unwrap();
        std::fs::create_dir_all(fixture.seeds_dir()).unwrap();
        fixture
    }

    pub fn remotes_dir(&self) -> PathBuf {
        self.temp_dir.path().join("remotes")
    }

    fn seeds_dir(&self) -> PathBuf {
        self.temp_dir.path().join("seeds")
    }

    /// Where synchronized checkouts go
    pub fn base_dir(&self) -> PathBuf {
        self.temp_dir.path().join("projects")
    }

    pub fn checkout(&self, name: &str) -> PathBuf {
        self.base_dir().join(name)
    }

    pub fn remote_url(&self, name: &str) -> String {
        self.remotes_dir()
            .join(format!("{}.git", name))
            .to_string_lossy()
            .into_owned()
    }

    /// Create a bare remote with one commit on `main`.
    pub fn create_remote(&self, name: &str) -> String {
        let remote = self.remotes_dir().join(format!("{}.git", name));
        let seed = self.seeds_dir().join(name);

        git(self.temp_dir.path(), &["init", "-q", "--bare", remote.to_str().unwrap()]);
        git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);

        git(self.temp_dir.path(), &["init", "-q", seed.to_str().unwrap()]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        commit_file(&seed, "README.md", &format!("# {}\n", name));
        git(&seed, &["remote", "add", "origin", remote.to_str().unwrap()]);
        git(&seed, &["push", "-q", "origin", "main"]);

        self.remote_url(name)
    }

    /// Push a new commit to the remote without touching any checkout.
    pub fn push_commit(&self, name: &str, file: &str, contents: &str) {
        let seed = self.seeds_dir().join(name);
        commit_file(&seed, file, contents);
        git(&seed, &["push", "-q", "origin", "main"]);
    }

    /// Write a JSON catalog listing `projects` as `(name, tox_init)`.
    pub fn write_catalog(&self, projects: &[(&str, Vec<&str>)]) -> PathBuf {
        let entries: Vec<String> = projects
            .iter()
            .map(|(name, environments)| {
                let environments: Vec<String> =
                    environments.iter().map(|e| format!("\"{}\"", e)).collect();
                format!(
                    "\"{}\": {{\"git_url\": \"{}\", \"tox_init\": [{}]}}",
                    name,
                    self.remote_url(name),
                    environments.join(", ")
                )
            })
            .collect();

        let path = self.temp_dir.path().join("git_projects.json");
        std::fs::write(&path, format!("{{{}}}", entries.join(",\n"))).unwrap();
        path
    }
}
