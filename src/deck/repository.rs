use std::collections::HashMap;

use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    core::{
        Category,
        CategoryCounts,
        Flag,
        ToneMarker,
        VocabItem,
    },
    store::RawRow,
};

/// Columns A-F of the vocabulary sheet.
const ROW_WIDTH: usize = 6;

/// In-memory snapshot of the vocabulary sheet.
#[derive(Debug, Default, Clone)]
pub struct VocabRepository {
    items: Vec<VocabItem>,
    index: HashMap<usize, usize>, // id -> position in `items`
}

impl VocabRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the snapshot. Unusable rows are skipped, but still consume an id.
    pub fn load(rows: Vec<RawRow>) -> Self {
        let total = rows.len();
        let items: Vec<VocabItem> =
            rows.iter().enumerate().filter_map(|(id, row)| parse_row(id, row)).collect();

        let skipped = total - items.len();
        if skipped > 0 {
            debug!(skipped, "skipped incomplete vocabulary rows");
        }
        info!(loaded = items.len(), "vocabulary loaded");

        let index = items.iter().enumerate().map(|(pos, item)| (item.id, pos)).collect();
        Self { items, index }
    }

    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_id(&self, id: usize) -> Option<&VocabItem> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    /// Sets one flag in place. Returns false, and changes nothing, for an unknown id.
    pub fn apply_flag(&mut self, id: usize, flag: Flag, value: bool) -> bool {
        match self.index.get(&id) {
            Some(&pos) => {
                self.items[pos].set_flag(flag, value);
                true
            }
            None => {
                warn!(id, column = flag.column(), value, "flag update for unknown vocabulary id");
                false
            }
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        let count = |category: Category| self.items.iter().filter(|i| category.matches(i)).count();
        CategoryCounts {
            daily: count(Category::Daily),
            too_easy: count(Category::TooEasy),
            to_learn: count(Category::ToLearn),
        }
    }
}

fn parse_row(id: usize, row: &RawRow) -> Option<VocabItem> {
    if row.cells.len() < ROW_WIDTH {
        return None;
    }

    let term = row.text(0)?.trim().to_string();
    if term.is_empty() {
        return None;
    }

    Some(VocabItem {
        id,
        term,
        phonetic_hint: row.text(1).unwrap_or_default(),
        translation: row.text(2).unwrap_or_default(),
        tone: ToneMarker::parse(&row.text(3).unwrap_or_default()),
        too_easy: row.flag(4),
        to_learn: row.flag(5),
    })
}
