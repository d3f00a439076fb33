//! Git integration: staged change collection and commit creation.

pub mod commit;
pub mod staged;

pub use commit::{Committer, GitCommitter};
pub use staged::{
    MAX_DIFF_BYTES, StagedChangeSet, collect_staged, core_editor, open_repository,
    truncate_on_line_boundary,
};
