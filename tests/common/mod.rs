#![allow(dead_code)]

use git2::{Oid, Repository};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A working repository with one commit and a bare repository as `origin`
pub struct TestRepo {
    pub origin: TempDir,
    pub work: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let origin = TempDir::new().expect("Could not create origin dir");
        Repository::init_bare(origin.path()).expect("Could not init bare repo");

        let work = TempDir::new().expect("Could not create work dir");
        let repo = Repository::init(work.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        let url = origin.path().to_str().expect("non-utf8 temp path").to_string();
        repo.remote("origin", &url).expect("Could not add origin");

        let test_repo = TestRepo { origin, work, repo };
        test_repo.commit("README.md", "hello\n", "initial commit");
        test_repo
    }

    /// Write a file and commit it on HEAD
    pub fn commit(&self, file: &str, content: &str, message: &str) -> Oid {
        fs::write(self.work.path().join(file), content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(file))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let sig = self.repo.signature().expect("Could not get sig");

        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("Could not peel HEAD")],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Write an untracked file in the working tree
    pub fn write(&self, file: &str, content: &str) {
        fs::write(self.work.path().join(file), content).expect("Could not write file");
    }

    /// Create a lightweight tag on HEAD
    pub fn tag_head(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD");
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .expect("Could not create tag");
    }

    /// Push the current branch to origin
    pub fn push_head(&self) {
        let head = self.repo.head().expect("Could not get HEAD");
        let name = head.name().expect("non-utf8 branch").to_string();
        let mut remote = self.repo.find_remote("origin").expect("No origin");
        remote
            .push(&[format!("{0}:{0}", name).as_str()], None)
            .expect("Could not push branch");
    }

    /// Open the bare origin repository
    pub fn origin_repo(&self) -> Repository {
        Repository::open_bare(self.origin.path()).expect("Could not open origin")
    }

    /// Whether origin has a tag with this name
    pub fn origin_has_tag(&self, name: &str) -> bool {
        self.origin_repo()
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
    }

    /// Whether the working repository has a tag with this name
    pub fn local_has_tag(&self, name: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
    }
}
