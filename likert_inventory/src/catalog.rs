use std::collections::HashSet;

use crate::config::*;

/// The ordered list of items of a questionnaire.
///
/// The declaration order is kept: it is the order in which the items are
/// presented and persisted. It has no influence on the scores.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, checking that it is not empty and that identifiers are unique.
    pub fn new(items: Vec<Item>) -> Result<Catalog, InventoryErrors> {
        if items.is_empty() {
            return Err(InventoryErrors::EmptyCatalog);
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for item in items.iter() {
            if !seen.insert(item.id.as_str()) {
                return Err(InventoryErrors::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Catalog { items })
    }

    /// The reference inventory: 7 dimensions of 8 items each.
    pub fn reference() -> Catalog {
        let items = REFERENCE_ITEMS
            .iter()
            .map(|(dimension, id, prompt, reverse)| Item {
                dimension: dimension.to_string(),
                id: id.to_string(),
                prompt: prompt.to_string(),
                reverse: *reverse,
            })
            .collect();
        Catalog { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// The dimensions, in the order in which they first appear.
    pub fn dimensions(&self) -> Vec<String> {
        let mut res: Vec<String> = Vec::new();
        for item in self.items.iter() {
            if !res.contains(&item.dimension) {
                res.push(item.dimension.clone());
            }
        }
        res
    }

    /// The items of one dimension, in declaration order.
    pub fn items_in<'a>(&'a self, dimension: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |item| item.dimension == dimension)
    }
}

const REFERENCE_ITEMS: &[(&str, &str, &str, bool)] = &[
    ("Communication", "COM01", "Messages are clear and understandable to everyone.", false),
    ("Communication", "COM02", "The team practices active listening in its interactions.", false),
    ("Communication", "COM03", "Feedback is frequent, respectful and constructive.", false),
    ("Communication", "COM04", "Relevant information is shared transparently.", false),
    ("Communication", "COM05", "Communication channels are accessible and well used.", false),
    ("Communication", "COM06", "Communication between areas is fluid and collaborative.", false),
    ("Communication", "COM07", "Meetings are focused, with agendas and minutes.", false),
    ("Communication", "COM08", "Noise, rumours and misunderstandings get in the way of work.", true),
    ("Conflict Management", "GC01", "Conflicts are identified and handled early on.", false),
    ("Conflict Management", "GC02", "There are clear criteria and processes to mediate conflicts.", false),
    ("Conflict Management", "GC03", "All parties are heard impartially and respectfully.", false),
    ("Conflict Management", "GC04", "Solutions that consider everyone's interests are sought.", false),
    ("Conflict Management", "GC05", "It is safe to disagree and voice different points of view.", false),
    ("Conflict Management", "GC06", "Leadership steps in fairly when needed.", false),
    ("Conflict Management", "GC07", "Conflicts drag on for a long time without resolution.", true),
    ("Conflict Management", "GC08", "Discussions degenerate into personal attacks.", true),
    ("Teamwork", "TE01", "There are shared goals and a common understanding of priorities.", false),
    ("Teamwork", "TE02", "Members cooperate and support each other on deliveries.", false),
    ("Teamwork", "TE03", "Knowledge and good practices are exchanged.", false),
    ("Teamwork", "TE04", "Roles and responsibilities are clear to everyone.", false),
    ("Teamwork", "TE05", "The team organizes itself to help during demand peaks.", false),
    ("Teamwork", "TE06", "There is mutual trust between members.", false),
    ("Teamwork", "TE07", "Silos between areas or teams make work harder.", true),
    ("Teamwork", "TE08", "There is unfair competition or sabotage between colleagues.", true),
    ("Respect", "RES01", "Interactions are cordial and polite.", false),
    ("Respect", "RES02", "Schedules and commitments are respected.", false),
    ("Respect", "RES03", "Contributions are fairly acknowledged.", false),
    ("Respect", "RES04", "Disrespectful interruptions happen often.", true),
    ("Respect", "RES05", "Diversity of opinions is respected.", false),
    ("Respect", "RES06", "Privacy and personal boundaries are respected.", false),
    ("Respect", "RES07", "Non-violent communication is encouraged and practiced.", false),
    ("Respect", "RES08", "Offensive jokes or an aggressive tone are tolerated.", true),
    ("Inclusion", "INC01", "There are equal opportunities for participation and development.", false),
    ("Inclusion", "INC02", "Diverse people are represented in decisions.", false),
    ("Inclusion", "INC03", "Accessibility (language, resources) is considered in interactions.", false),
    ("Inclusion", "INC04", "Reasonable adjustments are made when needed.", false),
    ("Inclusion", "INC05", "Anti-discrimination policies are known and enforced.", false),
    ("Inclusion", "INC06", "People feel that they belong to the group or team.", false),
    ("Inclusion", "INC07", "Microaggressions are tolerated or downplayed.", true),
    ("Inclusion", "INC08", "Minority voices are ignored in discussions and decisions.", true),
    ("Values", "CONV01", "Organizational values are clear and well known.", false),
    ("Values", "CONV02", "What is said matches what is done day to day.", false),
    ("Values", "CONV03", "Decisions are based on ethical principles.", false),
    ("Values", "CONV04", "It is safe to express convictions respectfully.", false),
    ("Values", "CONV05", "Diverse beliefs are respected without imposition.", false),
    ("Values", "CONV06", "Conflicts of values are avoided or ignored.", true),
    ("Values", "CONV07", "Unethical practices are normalized in daily life.", true),
    ("Values", "CONV08", "Social responsibility initiatives are encouraged.", false),
    ("Leadership", "LID01", "Leadership is accessible and present day to day.", false),
    ("Leadership", "LID02", "Priorities are defined and communicated clearly.", false),
    ("Leadership", "LID03", "Performance is acknowledged and receives feedback.", false),
    ("Leadership", "LID04", "Team development and mentoring are encouraged.", false),
    ("Leadership", "LID05", "Data and the team are taken into account in decisions.", false),
    ("Leadership", "LID06", "There is excessive micromanagement.", true),
    ("Leadership", "LID07", "Favoritism influences decisions and opportunities.", true),
    ("Leadership", "LID08", "Collaboration between areas and teams is promoted.", false),
];
