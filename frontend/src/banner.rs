pub struct BannerLine {
    pub text: &'static str,
    pub style: &'static str,
}

pub const BANNER: [BannerLine; 3] = [
    BannerLine {
        text: "AgriSense 🌿",
        style: "color: #2d5016; font-size: 24px; font-weight: bold;",
    },
    BannerLine {
        text: "AI-Powered Smart Farming Assistant",
        style: "color: #4a7c2c; font-size: 14px;",
    },
    BannerLine {
        text: "Team GreenTech | AgriHack 2026",
        style: "color: #7cb342; font-size: 12px;",
    },
];

/// Prints the styled greeting to the developer console.
pub fn print() {
    for line in &BANNER {
        gloo_console::log!(format!("%c{}", line.text), line.style);
    }
}
