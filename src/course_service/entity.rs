//! Store and link trait implementations for the [`Course`] type.
//!
//! [`Resource`] lets a [`ResourceActor`](crate::framework::ResourceActor) keep courses,
//! indexed by their normalized category. [`Linkable`] exposes the `id` and
//! `category` tokens the course route table refers to.

use crate::framework::Resource;
use crate::links::Linkable;
use crate::model::Course;

impl Resource for Course {
    type Id = u64;

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id: Some(id), ..self }
    }

    fn index_key(&self) -> Option<String> {
        let key = self.category_key();
        (!key.is_empty()).then_some(key)
    }
}

impl Linkable for Course {
    fn link_token(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.map(|id| id.to_string()),
            "category" if !self.category.trim().is_empty() => Some(self.category.clone()),
            _ => None,
        }
    }
}
