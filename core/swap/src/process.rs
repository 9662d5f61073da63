use crate::config::SwapConfig;
use crate::error::{Result, SwapError};
use crate::report::{StateOutcome, SwapReport, SwapStatus};
use crate::staging::Staging;
use script::{Category, OwnerCode, OwnershipTable, Patched, StateId, parse_ownership, patch_ownership};
use state_index::{IndexBuild, IndexEntry, StateIndex, build_index_from_dirs, load_index, save_index};
use std::fs;
use std::path::Path;

/// Applies the owners declared in the master states file to the pops and
/// buildings corpus.
pub struct OwnershipSwap {
    config: SwapConfig,
}

impl OwnershipSwap {
    pub fn new(config: SwapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// Rebuild the index from the category directories and persist it.
    pub fn rebuild_index(&self) -> Result<IndexBuild> {
        self.config.validate_corpus()?;
        let dirs = Category::ALL.map(|category| (category, self.config.category_dir(category)));
        let build = build_index_from_dirs(&dirs, self.config.collision_policy)?;
        save_index(&build.index, &self.config.index_file)?;
        tracing::info!(path = ?self.config.index_file, states = build.index.len(), "saved state index");
        Ok(build)
    }

    /// Load the persisted index, rebuilding it when missing, unparseable or
    /// invalidated. The build details are returned only for a rebuild.
    pub fn load_or_build_index(&self) -> Result<(StateIndex, Option<IndexBuild>)> {
        if !self.config.rebuild_index {
            match load_index(&self.config.index_file) {
                Ok(Some(index)) => {
                    tracing::info!(path = ?self.config.index_file, states = index.len(), "loaded state index");
                    return Ok((index, None));
                }
                Ok(None) => {
                    tracing::info!(path = ?self.config.index_file, "index file missing, rebuilding");
                }
                Err(err) => {
                    tracing::warn!(path = ?self.config.index_file, %err, "index file unusable, rebuilding");
                }
            }
        }

        let mut build = self.rebuild_index()?;
        let index = std::mem::take(&mut build.index);
        Ok((index, Some(build)))
    }

    /// Parse the master states file.
    pub fn ownership_table(&self) -> Result<OwnershipTable> {
        let content = fs::read_to_string(&self.config.states_file)?;
        let table = parse_ownership(&content)?;
        tracing::info!(entries = table.len(), "found state ownership entries");
        Ok(table)
    }

    /// Run the full swap.
    ///
    /// Setup failures (missing states file or corpus directory) abort before
    /// anything is staged. Everything after that is best effort: states and
    /// files that cannot be processed are recorded in the report.
    pub fn run(&self) -> Result<SwapReport> {
        self.config.validate()?;

        let (index, build) = self.load_or_build_index()?;
        let table = self.ownership_table()?;

        let mut report = SwapReport {
            index_rebuilt: build.is_some(),
            unreadable_files: build
                .map(|build| build.unreadable.into_iter().collect())
                .unwrap_or_default(),
            ..SwapReport::default()
        };
        let mut staging = Staging::new(&self.config.output_dir);

        for (state, owner) in &table {
            let outcome = match index.get(state) {
                Some(entry) => self.swap_state(state, *owner, entry, &mut staging, &mut report)?,
                None => {
                    tracing::warn!(%state, "state not found in index, skipping");
                    StateOutcome {
                        state: state.clone(),
                        owner: *owner,
                        status: SwapStatus::Skipped,
                        files: Vec::new(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        report.staged_files = staging.len();
        tracing::info!(
            states = report.outcomes.len(),
            patched = report.count(SwapStatus::Patched),
            unchanged = report.count(SwapStatus::Unchanged),
            not_found = report.count(SwapStatus::NotFound),
            unreadable = report.count(SwapStatus::Unreadable),
            skipped = report.count(SwapStatus::Skipped),
            "ownership swap completed"
        );
        Ok(report)
    }

    fn swap_state(
        &self,
        state: &StateId,
        owner: OwnerCode,
        entry: &IndexEntry,
        staging: &mut Staging,
        report: &mut SwapReport,
    ) -> Result<StateOutcome> {
        let mut found = false;
        let mut unreadable = false;
        let mut files = Vec::new();

        for (category, file_name) in entry.files() {
            let source = self.config.category_dir(category).join(file_name);
            let target = staging.output_path(category, file_name);

            // Read before staging so an unreadable file never lands in the output.
            let current = if staging.is_staged(&target) { &target } else { &source };
            let content = match fs::read_to_string(current) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!(%state, path = ?current, %err, "skipping unreadable file");
                    report.unreadable_files.insert(current.clone());
                    unreadable = true;
                    continue;
                }
            };
            let staged = staging.stage(category, &source, file_name)?;

            let patched = patch_ownership(&content, state, owner)?;
            if !patched.found {
                tracing::debug!(%state, path = ?current, "state block not found");
                report.blocks_not_found += 1;
                continue;
            }
            found = true;

            if patched.changed {
                fs::write(&staged, &patched.text)?;
                tracing::debug!(%state, %owner, path = ?staged, "updated ownership");
                files.push(staged);
            }
        }

        let status = if !files.is_empty() {
            SwapStatus::Patched
        } else if found {
            SwapStatus::Unchanged
        } else if unreadable {
            SwapStatus::Unreadable
        } else {
            SwapStatus::NotFound
        };

        Ok(StateOutcome {
            state: state.clone(),
            owner,
            status,
            files,
        })
    }
}

/// Patch a single file for one state and write the result to `output`.
///
/// The output is written only when the text changed. Writing back over
/// `input` is refused.
pub fn swap_file(input: &Path, output: &Path, state: &StateId, owner: OwnerCode) -> Result<Patched> {
    if output.exists() && fs::canonicalize(input)? == fs::canonicalize(output)? {
        return Err(SwapError::InPlacePatch(output.to_path_buf()));
    }

    let content = fs::read_to_string(input)?;
    let patched = patch_ownership(&content, state, owner)?;
    if patched.changed {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output, &patched.text)?;
    }
    Ok(patched)
}
