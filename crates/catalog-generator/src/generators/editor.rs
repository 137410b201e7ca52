//! Editor generator.

use crate::distribution::Distribution;
use crate::text;
use catalog_core::{Editor, EditorType};

type NameTemplate = fn(&mut Distribution) -> String;

const COMPANY_NAME_TEMPLATES: &[NameTemplate] = &[
    |d| format!("{} Games", text::company_name(d)),
    |d| format!("{} Entertainment", text::company_name(d)),
    |d| format!("{} Studios", text::company_name(d)),
    |d| format!("{} Interactive", text::pick(d, text::LAST_NAMES)),
    |d| format!("{} Games", text::pick(d, text::GODS)),
];

/// Creates editors, each independently an enterprise or an individual.
#[derive(Debug, Clone, Copy)]
pub struct EditorGenerator {
    /// Percentage (0-100) of editors that are companies.
    pub enterprise_rate: u8,
}

impl EditorGenerator {
    pub fn new(enterprise_rate: u8) -> Self {
        Self { enterprise_rate }
    }

    /// Generate `count` editors.
    pub fn generate(&self, dist: &mut Distribution, count: u32) -> Vec<Editor> {
        (0..count).map(|_| self.generate_one(dist)).collect()
    }

    fn generate_one(&self, dist: &mut Distribution) -> Editor {
        let id = dist.uuid_v4();
        let editor_type = if dist.weighted_boolean(self.enterprise_rate) {
            EditorType::Enterprise
        } else {
            EditorType::Individual
        };

        let name = match editor_type {
            EditorType::Enterprise => {
                let template = *dist.choose_one(COMPANY_NAME_TEMPLATES);
                template(dist)
            }
            EditorType::Individual => text::full_name(dist),
        };
        let password = text::password(dist, 8, 20);
        let description = describe(dist, editor_type);

        Editor {
            id,
            name,
            password,
            editor_type,
            description,
        }
    }
}

fn describe(dist: &mut Distribution, editor_type: EditorType) -> String {
    match editor_type {
        EditorType::Enterprise => {
            let phrase = text::catch_phrase(dist);
            let filler = text::sentence(dist, 15);
            let buzz = text::business_buzz(dist);
            format!("{phrase}. {filler} {buzz}")
        }
        EditorType::Individual => {
            let filler = text::sentence(dist, 10);
            let quote = text::indie_quote(dist);
            format!("Independent game developer. {filler} {quote}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_count_and_unique_ids() {
        let mut dist = Distribution::from_seed(42);
        let editors = EditorGenerator::new(80).generate(&mut dist, 50);

        assert_eq!(editors.len(), 50);
        let ids: HashSet<_> = editors.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_all_enterprise() {
        let mut dist = Distribution::from_seed(1);
        let editors = EditorGenerator::new(100).generate(&mut dist, 20);

        for editor in &editors {
            assert_eq!(editor.editor_type, EditorType::Enterprise);
            assert!(!editor.description.starts_with("Independent"));
        }
    }

    #[test]
    fn test_all_individual() {
        let mut dist = Distribution::from_seed(2);
        let editors = EditorGenerator::new(0).generate(&mut dist, 20);

        for editor in &editors {
            assert_eq!(editor.editor_type, EditorType::Individual);
            assert!(editor.description.starts_with("Independent game developer."));
            assert_eq!(editor.name.split(' ').count(), 2);
        }
    }

    #[test]
    fn test_password_bounds() {
        let mut dist = Distribution::from_seed(3);
        for editor in EditorGenerator::new(50).generate(&mut dist, 30) {
            assert!((8..=20).contains(&editor.password.len()));
        }
    }
}
