//! Built-in directory of crisis hotlines, support organizations, and
//! educational topics.
//!
//! This content ships with the binary and never touches storage.

use serde::Serialize;

/// How a hotline is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HotlineCategory {
    /// National voice hotline.
    National,
    /// Text or chat service.
    TextSupport,
    /// Emergency services.
    Emergency,
}

/// A crisis hotline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hotline {
    /// Display name.
    pub name: &'static str,
    /// Number to dial or text.
    pub number: &'static str,
    /// One-line description of the service.
    pub info: &'static str,
    /// How the service is reached.
    pub category: HotlineCategory,
}

/// A support organization's website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Organization name.
    pub title: &'static str,
    /// Website address.
    pub url: &'static str,
    /// What the organization offers.
    pub description: &'static str,
}

/// An educational topic about domestic violence and getting help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Section the topic is listed under.
    pub section: &'static str,
    /// Topic heading.
    pub title: &'static str,
    /// Introductory text. May be empty.
    pub body: &'static str,
    /// Bullet points.
    pub points: &'static [&'static str],
}

/// Reminder shown after the educational topics.
pub const REASSURANCE: &str =
    "Remember: Abuse is never your fault. You deserve to be safe and respected.";

/// Tip shown after the hotline list.
pub const DISCRETION_TIP: &str =
    "Save these numbers in your phone contacts with discreet names for quick access.";

/// Practical advice shown alongside the safety plan.
pub const SAFETY_TIPS: &[&str] = &[
    "Keep important phone numbers memorized",
    "Practice your safety plan when it's safe to do so",
    "Tell trusted people about your code word",
    "Keep your emergency bag in an accessible place",
    "Update your plan as your situation changes",
];

const HOTLINES: &[Hotline] = &[
    Hotline {
        name: "National Domestic Violence Hotline",
        number: "1-800-799-7233",
        info: "24/7 confidential support, available in 200+ languages",
        category: HotlineCategory::National,
    },
    Hotline {
        name: "National DV Hotline (TTY)",
        number: "1-800-787-3224",
        info: "For Deaf/Hard of Hearing",
        category: HotlineCategory::National,
    },
    Hotline {
        name: "988 Suicide & Crisis Lifeline",
        number: "988",
        info: "Mental health crisis support",
        category: HotlineCategory::National,
    },
    Hotline {
        name: "National DV Hotline Text Line",
        number: "88788",
        info: "Text \"START\" for text support",
        category: HotlineCategory::TextSupport,
    },
    Hotline {
        name: "Emergency Services",
        number: "911",
        info: "If you are in immediate danger",
        category: HotlineCategory::Emergency,
    },
];

const RESOURCES: &[Resource] = &[
    Resource {
        title: "National Domestic Violence Hotline",
        url: "https://www.thehotline.org",
        description: "24/7 support, resources, and information",
    },
    Resource {
        title: "WomensLaw.org",
        url: "https://www.womenslaw.org",
        description: "Legal information and resources",
    },
    Resource {
        title: "Love Is Respect",
        url: "https://www.loveisrespect.org",
        description: "Support for teens and young adults",
    },
];

const ONLINE_CHAT: Resource = Resource {
    title: "Online Chat",
    url: "https://www.thehotline.org",
    description: "Live chat support from the National Domestic Violence Hotline",
};

const TOPICS: &[Topic] = &[
    Topic {
        section: "Understanding Domestic Violence",
        title: "What is Domestic Violence?",
        body: "Domestic violence is a pattern of behaviors used to gain or maintain \
               power and control over an intimate partner. It can include:",
        points: &[
            "Physical abuse",
            "Emotional/psychological abuse",
            "Sexual abuse",
            "Financial abuse",
            "Digital abuse",
            "Stalking",
        ],
    },
    Topic {
        section: "Understanding Domestic Violence",
        title: "Warning Signs",
        body: "",
        points: &[
            "Constant criticism or belittling",
            "Controlling behavior",
            "Isolation from friends/family",
            "Extreme jealousy",
            "Threats or intimidation",
            "Unpredictable mood swings",
        ],
    },
    Topic {
        section: "Getting Help",
        title: "Creating a Safety Plan",
        body: "A safety plan is a personalized, practical plan to improve your safety. \
               Use `safeharbor plan` to:",
        points: &[
            "Identify safe places to go",
            "List trusted contacts",
            "Prepare an emergency bag",
            "Document important information",
        ],
    },
    Topic {
        section: "Getting Help",
        title: "Legal Options",
        body: "Contact local legal aid organizations for free or low-cost legal assistance.",
        points: &[
            "Restraining/Protection Orders",
            "Emergency Protective Orders",
            "Criminal Charges",
            "Custody and Divorce Proceedings",
        ],
    },
    Topic {
        section: "Getting Help",
        title: "Shelters and Housing",
        body: "Domestic violence shelters provide safe, temporary housing and support \
               services. Contact the National Hotline for referrals to local shelters.",
        points: &[],
    },
    Topic {
        section: "For Friends & Family",
        title: "How to Help",
        body: "",
        points: &[
            "Listen without judgment",
            "Believe and validate their experience",
            "Don't force them to leave",
            "Help them safety plan",
            "Connect them with resources",
            "Be patient and supportive",
        ],
    },
];

/// All hotlines, most broadly useful first.
#[must_use]
pub fn hotlines() -> &'static [Hotline] {
    HOTLINES
}

/// Hotlines in one category.
pub fn hotlines_in(category: HotlineCategory) -> impl Iterator<Item = &'static Hotline> {
    HOTLINES.iter().filter(move |h| h.category == category)
}

/// All support organization websites.
#[must_use]
pub fn resources() -> &'static [Resource] {
    RESOURCES
}

/// Web chat alternative to the phone and text lines.
#[must_use]
pub fn online_chat() -> &'static Resource {
    &ONLINE_CHAT
}

/// All educational topics, in reading order.
#[must_use]
pub fn topics() -> &'static [Topic] {
    TOPICS
}

/// Educational topics grouped by section, preserving reading order.
#[must_use]
pub fn topic_sections() -> Vec<(&'static str, Vec<&'static Topic>)> {
    let mut sections: Vec<(&'static str, Vec<&'static Topic>)> = Vec::new();
    for topic in TOPICS {
        match sections.last_mut() {
            Some((section, entries)) if *section == topic.section => entries.push(topic),
            _ => sections.push((topic.section, vec![topic])),
        }
    }
    sections
}
