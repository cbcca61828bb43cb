use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub title: &'static str,
    pub cards: Vec<Card>,
}

const CARDS: [Card; 6] = [
    Card { title: "Clubs", description: "Manage Club account generation", href: "/dashboard/clubs" },
    Card { title: "Devices", description: "Register and manage club devices", href: "/dashboard/devices" },
    Card { title: "Players", description: "Add, edit, and remove players", href: "/dashboard/players" },
    Card { title: "Keychains", description: "View and issue player keys per club", href: "/dashboard/keychains" },
    Card { title: "Activities", description: "View kiosk login and attendance events", href: "/dashboard/activities" },
    Card { title: "API Keys", description: "Issue and revoke dashboard API keys", href: "/dashboard/api-keys" },
];

pub fn overview() -> Overview {
    Overview { title: "Playfolio Admin Dashboard", cards: CARDS.to_vec() }
}
