// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The tree-shaped summary a subcommand logs before it does any work.

use std::borrow::Cow;

use log::Level;

type Block = Vec<Cow<'static, str>>;

/// What a subcommand has been set up to do, plus anything about the request
/// that the user should double check. Logged (to stderr) as two trees:
///
/// ```text
/// Sensitivity set up
/// ├ 64 dishes from the built-in MeerKAT layout
/// ├ Considering a radius of 0.5 km
/// │ Sub-array of 32 dishes
/// └ Plots into .
/// ```
pub(crate) struct SetupReport {
    title: &'static str,
    blocks: Vec<Block>,
    warnings: Vec<Block>,
}

impl SetupReport {
    pub(crate) fn new(title: &'static str) -> SetupReport {
        SetupReport {
            title,
            blocks: vec![],
            warnings: vec![],
        }
    }

    pub(crate) fn push_line<S: Into<Cow<'static, str>>>(&mut self, line: S) {
        self.blocks.push(vec![line.into()]);
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        if !block.is_empty() {
            self.blocks.push(block);
        }
    }

    pub(crate) fn warn_line<S: Into<Cow<'static, str>>>(&mut self, line: S) {
        self.warnings.push(vec![line.into()]);
    }

    pub(crate) fn warn_block(&mut self, block: Block) {
        if !block.is_empty() {
            self.warnings.push(block);
        }
    }

    /// Every warning line, in the order they were added.
    pub(crate) fn warnings(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().flatten().map(|l| l.as_ref())
    }

    pub(crate) fn log(self) {
        log_tree(Level::Info, self.title, &self.blocks);
        if !self.warnings.is_empty() {
            log_tree(Level::Warn, "Warnings", &self.warnings);
        }
    }
}

fn log_tree(level: Level, title: &str, blocks: &[Block]) {
    log::log!(level, "{}", console::style(title).bold());
    for line in tree_lines(blocks) {
        log::log!(level, "{line}");
    }
    log::log!(level, "");
}

/// Prefix each line with its branch of the tree. The first line of a block
/// branches off the trunk, the rest of the block hangs under it, and the
/// final block closes the trunk when it only has one line.
fn tree_lines(blocks: &[Block]) -> Vec<String> {
    let mut lines = vec![];
    for (i_block, block) in blocks.iter().enumerate() {
        let last_block = i_block + 1 == blocks.len();
        for (i_line, line) in block.iter().enumerate() {
            let symbol = match i_line {
                0 if last_block && block.len() == 1 => '└',
                0 => '├',
                _ => '│',
            };
            lines.push(format!("{symbol} {line}"));
        }
    }
    lines
}
