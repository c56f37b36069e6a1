//! Default rule table for the chatbot.
//!
//! Crisis phrasing is declared first so it always wins over topic rules.

use super::responder::{Fallback, KeywordResponder, KeywordRule};
use crate::models::{LinkKind, ResourceLink};

struct RuleDef {
    patterns: &'static [&'static str],
    response: &'static str,
    links: fn() -> Vec<ResourceLink>,
}

fn crisis_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new("988 Suicide & Crisis Lifeline", "988", LinkKind::Crisis),
        ResourceLink::new("Crisis Text Line (text HOME)", "sms:741741", LinkKind::Crisis),
        ResourceLink::new("Emergency services", "911", LinkKind::Crisis),
    ]
}

fn panic_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new(
            "Understanding Panic Attacks: Signs and Coping Strategies",
            "/articles",
            LinkKind::Article,
        ),
        ResourceLink::new(
            "Panic Disorder Information",
            "https://www.nimh.nih.gov/health/topics/panic-disorder",
            LinkKind::Article,
        ),
    ]
}

fn anxiety_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new(
            "Anxiety and Depression Association",
            "https://adaa.org/understanding-anxiety",
            LinkKind::Article,
        ),
        ResourceLink::new(
            "NIMH Anxiety Disorders",
            "https://www.nimh.nih.gov/health/topics/anxiety-disorders",
            LinkKind::Article,
        ),
    ]
}

fn depression_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new(
            "NIMH Depression Information",
            "https://www.nimh.nih.gov/health/topics/depression",
            LinkKind::Article,
        ),
        ResourceLink::new(
            "Understanding depression (video)",
            "https://www.youtube.com/watch?v=z-IR48Mb3W0",
            LinkKind::Video,
        ),
    ]
}

fn stress_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new(
            "Managing Work-Related Stress and Burnout",
            "/articles",
            LinkKind::Article,
        ),
        ResourceLink::new("APA: Stress", "https://www.apa.org/topics/stress", LinkKind::Article),
    ]
}

fn therapy_links() -> Vec<ResourceLink> {
    vec![ResourceLink::new(
        "What to Expect in Your First Therapy Session",
        "/articles",
        LinkKind::Article,
    )]
}

fn trauma_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new("National Center for PTSD", "https://www.ptsd.va.gov/", LinkKind::Article),
        ResourceLink::new(
            "SAMHSA Trauma Resources",
            "https://www.samhsa.gov/trauma-informed-care",
            LinkKind::Article,
        ),
    ]
}

fn crisis_video_links() -> Vec<ResourceLink> {
    vec![
        ResourceLink::new(
            "What to Do in a Mental Health Crisis",
            "https://www.youtube.com/watch?v=WcSUs9iZv-g",
            LinkKind::Video,
        ),
        ResourceLink::new(
            "Suicide Prevention: How to Help Someone",
            "https://www.youtube.com/watch?v=2X4qySqsYP8",
            LinkKind::Video,
        ),
    ]
}

fn no_links() -> Vec<ResourceLink> {
    Vec::new()
}

const RULES: &[RuleDef] = &[
    RuleDef {
        patterns: &[
            "suicide",
            "suicidal",
            "kill myself",
            "end my life",
            "want to die",
            "self harm",
            "self-harm",
            "hurt myself",
        ],
        response: "I'm really sorry you're feeling this way. You deserve support right now. \
                   Please reach out to a crisis line: call or text 988, text HOME to 741741, \
                   or call emergency services if you are in immediate danger.",
        links: crisis_links,
    },
    RuleDef {
        patterns: &["someone in crisis", "friend in crisis", "help someone"],
        response: "Supporting someone in crisis is hard. Stay with them, listen without judgement, \
                   remove anything they could use to hurt themselves, and connect them with a \
                   crisis line or emergency services.",
        links: crisis_video_links,
    },
    RuleDef {
        patterns: &["panic attack", "panic"],
        response: "Panic attacks are frightening but not dangerous, and they pass. Try the \
                   5-4-3-2-1 grounding technique: name 5 things you can see, 4 you can touch, \
                   3 you can hear, 2 you can smell, and 1 you can taste. Breathe in slowly for \
                   four counts and out for six.",
        links: panic_links,
    },
    RuleDef {
        patterns: &["anxiety", "anxious", "worried", "nervous"],
        response: "Anxiety is a natural response to stress, but it can become overwhelming. \
                   Deep breathing, progressive muscle relaxation and limiting caffeine can help. \
                   If worry is interfering with daily life, talking to a professional is a good step.",
        links: anxiety_links,
    },
    RuleDef {
        patterns: &["depress", "hopeless", "empty inside", "sad"],
        response: "I'm sorry you're going through this. Persistent sadness, losing interest in \
                   things, and changes in sleep or appetite are worth talking to someone about. \
                   Small steps like a short walk or reaching out to a friend can help today.",
        links: depression_links,
    },
    RuleDef {
        patterns: &["stress", "burnout", "burned out", "overwhelmed"],
        response: "It sounds like you're carrying a lot. Try breaking tasks into smaller pieces, \
                   taking short breaks, and protecting time for rest. Setting boundaries at work \
                   is a skill, not a weakness.",
        links: stress_links,
    },
    RuleDef {
        patterns: &["can't sleep", "insomnia", "sleep"],
        response: "Sleep and mood are closely linked. Keep a regular schedule, avoid screens \
                   before bed, and limit caffeine after noon. If sleeplessness lasts for weeks, \
                   mention it to a doctor.",
        links: no_links,
    },
    RuleDef {
        patterns: &["lonely", "alone", "isolated"],
        response: "Feeling lonely is painful, and you're not the only one who feels it. Reaching \
                   out to one person today, or joining a peer support group, can make a difference.",
        links: no_links,
    },
    RuleDef {
        patterns: &["grief", "grieving", "lost someone", "passed away"],
        response: "I'm so sorry for your loss. Grief has no schedule. Be gentle with yourself, \
                   and lean on people you trust or a grief support group.",
        links: no_links,
    },
    RuleDef {
        patterns: &["trauma", "ptsd", "flashback"],
        response: "Trauma responses like flashbacks, nightmares and feeling on edge are common \
                   after distressing events. Trauma-focused therapy can help you heal at your own pace.",
        links: trauma_links,
    },
    RuleDef {
        patterns: &["therapist", "therapy", "counsel"],
        response: "You can find a therapist through your insurance provider, a referral from your \
                   doctor, or online directories. It's okay to try a few before finding the right fit.",
        links: therapy_links,
    },
    RuleDef {
        patterns: &["self-care", "self care"],
        response: "Self-care includes getting enough sleep, eating well, moving your body, \
                   connecting with others, and making time for things you enjoy.",
        links: no_links,
    },
    RuleDef {
        patterns: &["hello", "hi there", "good morning", "good evening"],
        response: "Hi, I'm the MindWise assistant. How are you feeling today?",
        links: no_links,
    },
    RuleDef {
        patterns: &["thank"],
        response: "You're welcome. I'm here whenever you want to talk.",
        links: no_links,
    },
];

const FALLBACK_RESPONSE: &str = "Thank you for sharing. I'm a simple assistant and may not \
    understand everything, but you don't have to face things alone. Browse our education hub \
    or articles, or reach out to a crisis line if you need to talk to someone now.";

fn fallback() -> Fallback {
    Fallback {
        response: FALLBACK_RESPONSE.to_string(),
        links: vec![
            ResourceLink::new("Education Hub", "/education", LinkKind::Article),
            ResourceLink::new("Articles", "/articles", LinkKind::Article),
            ResourceLink::new("Crisis Help", "/crisis", LinkKind::Crisis),
        ],
    }
}

/// Expands the table into one `KeywordRule` per pattern, keeping declaration order.
pub fn default_rules() -> Vec<KeywordRule> {
    RULES
        .iter()
        .flat_map(|def| {
            def.patterns.iter().filter_map(move |pattern| {
                // Patterns are literals above; a blank one is a table bug
                KeywordRule::new(pattern, def.response, (def.links)()).ok()
            })
        })
        .collect()
}

pub fn default_responder() -> KeywordResponder {
    KeywordResponder::new(default_rules(), fallback())
}
