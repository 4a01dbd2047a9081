use crate::core::{
    Category,
    VocabItem,
};

/// Items eligible for `category`, in repository order. Never cached: call on every draw.
pub fn select_queue(items: &[VocabItem], category: Category) -> Vec<&VocabItem> {
    items.iter().filter(|item| category.matches(item)).collect()
}

pub fn select_queue_ids(items: &[VocabItem], category: Category) -> Vec<usize> {
    select_queue(items, category).into_iter().map(|item| item.id).collect()
}
