//! Searchable content catalog and its filter.
//!
//! Filtering is pure: it never reorders or mutates the catalog.

use serde::Serialize;

use crate::models::{ContentItem, ContentKind};

/// Category selection. `"all"` (or nothing) means no category filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(id) if id.eq_ignore_ascii_case("all") => CategoryFilter::All,
            Some(id) => CategoryFilter::Only(id.to_string()),
        }
    }

    fn accepts(&self, item: &ContentItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => item.category == *id,
        }
    }
}

/// Items whose category passes `category` and whose title, body or category
/// contains `query` (case-insensitive), in catalog order.
pub fn filter<'a>(
    items: &'a [ContentItem],
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'a ContentItem> {
    let needle = query.trim().to_lowercase();

    items
        .iter()
        .filter(|item| category.accepts(item))
        .filter(|item| {
            needle.is_empty()
                || item.title.to_lowercase().contains(&needle)
                || item.body.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentCatalog {
    items: Vec<ContentItem>,
}

impl ContentCatalog {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn search(&self, query: &str, category: &CategoryFilter) -> Vec<&ContentItem> {
        filter(&self.items, query, category)
    }

    /// Distinct category ids in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

fn item(
    id: u32,
    kind: ContentKind,
    title: &str,
    body: &str,
    category: &str,
    target: &str,
) -> ContentItem {
    ContentItem {
        id,
        kind,
        title: title.to_string(),
        body: body.to_string(),
        category: category.to_string(),
        target: target.to_string(),
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        use ContentKind::*;

        Self::new(vec![
            // FAQs
            item(1, Faq, "What is anxiety?",
                "Anxiety is a natural response to stress, but when it becomes overwhelming, it can interfere with daily life. Common symptoms include excessive worry, restlessness, and physical symptoms like rapid heartbeat.",
                "anxiety", "/education"),
            item(2, Faq, "How to deal with panic attacks?",
                "Panic attacks can be frightening but are not dangerous. Try the 5-4-3-2-1 grounding technique: name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
                "anxiety", "/chatbot"),
            item(3, Faq, "What are symptoms of depression?",
                "Common symptoms include persistent sadness, loss of interest in activities, changes in sleep and appetite, fatigue, difficulty concentrating, and thoughts of worthlessness or guilt.",
                "depression", "/education"),
            item(4, Faq, "How to find a therapist?",
                "You can search through your insurance provider, ask for referrals from your doctor, or use online directories. It's okay to try a few therapists to find the right fit.",
                "therapy", "/chatbot"),
            item(5, Faq, "What is self-care?",
                "Self-care is essential for mental health. This includes getting enough sleep, eating well, exercising, connecting with others, and doing activities you enjoy.",
                "self-care", "/chatbot"),
            // Articles
            item(6, Article, "What to Expect in Your First Therapy Session",
                "A comprehensive guide to help you prepare for and understand what happens during your first therapy appointment.",
                "therapy", "/articles"),
            item(7, Article, "Understanding Panic Attacks: Signs and Coping Strategies",
                "Learn to recognize panic attack symptoms and discover evidence-based techniques to manage them effectively.",
                "anxiety", "/articles"),
            item(8, Article, "Mental Health in Men: Breaking the Stigma",
                "Exploring the unique challenges men face in seeking mental health support and how to overcome barriers.",
                "depression", "/articles"),
            item(9, Article, "Building Resilience: A Daily Practice Guide",
                "Practical strategies and daily habits to build psychological resilience and improve mental well-being.",
                "self-care", "/articles"),
            // Crisis resources
            item(10, Crisis, "National Suicide Prevention Lifeline",
                "Free, confidential support 24/7. Call 988 for immediate crisis support.",
                "crisis", "/crisis"),
            item(11, Crisis, "Crisis Text Line",
                "Text HOME to 741741 for free, 24/7 crisis support via text message.",
                "crisis", "/crisis"),
            item(12, Crisis, "Emergency Mental Health Services",
                "If you're in immediate danger, call 911 or go to your nearest emergency room.",
                "crisis", "/crisis"),
            // Education topics
            item(13, Education, "Depression Overview",
                "Understanding major depressive disorder, its symptoms, and treatment options.",
                "depression", "/education"),
            item(14, Education, "Anxiety Disorders",
                "Learn about anxiety disorders, panic attacks, and effective coping strategies.",
                "anxiety", "/education"),
            item(15, Education, "Trauma and PTSD",
                "Understanding trauma responses, PTSD symptoms, and healing approaches.",
                "trauma", "/education"),
            item(16, Education, "Bipolar Disorder",
                "Understanding mood episodes, triggers, and long-term management strategies.",
                "bipolar", "/education"),
            item(17, Education, "ADHD Information",
                "Information about attention-deficit/hyperactivity disorder across all ages.",
                "adhd", "/education"),
        ])
    }
}
