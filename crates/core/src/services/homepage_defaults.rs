//! Built-in homepage content.
//!
//! Served whenever no settings document exists or it cannot be read, and
//! used to fill fields a stored document leaves empty.

#![allow(missing_docs)]

use obf_richtext::{BlockNode, Document, InlineNode, RichText, from_plain_text};
use once_cell::sync::Lazy;

use super::homepage_settings::{PublicCard, PublicHomepage, SocialNetwork};

pub const TITLE: &str = "Homepage Settings";
pub const INTRO_HEADING: &str = "India In The 21st Century";
pub const AUDIO_URL: &str = "/audio/obf-intro.mp3";
pub const AUDIO_NAME: &str = "OBF Podcast";
pub const COMING_SOON_LABEL: &str = "Explore One Big future";
pub const COMING_SOON_HEADING: &str = "Coming Soon";
pub const CARD_BACKGROUND_COLOR: &str = "#FFF1E7";
pub const CARD_TEXT_COLOR: &str = "#EF671F";
pub const SHARE_VISION_LABEL: &str = "SHARE YOUR VISION";
pub const SHARE_VISION_HEADING: &str = "What Is Your Dream For India's Future?";
pub const SHARE_VISION_BUTTON_TEXT: &str = "Contact us";
pub const SHARE_VISION_BUTTON_LINK: &str = "/contact-us";
pub const ADDRESS: &str = "C7, SDA Commercial Complex\nOpposite IIT Campus\nNew Delhi 110016, India";

const INTRO_PARAGRAPHS: [&str; 4] = [
    "The 21st century is poised to be defined by India's ascent\u{2014} a century where the nation doesn't just rise but soars.",
    "India stands at the cusp of a transformative era, emerging as a beacon of innovation, collaboration and growth on the global stage.",
    "A young, forward-looking workforce, fueled by a culture of ingenuity and collaboration, is powering a wave of progress that resonates far beyond its borders.",
    "One Big Future (OBF) is built to capture this momentum.",
];

/// The payload served when no usable settings document exists.
pub static PUBLIC_HOMEPAGE: Lazy<PublicHomepage> = Lazy::new(|| PublicHomepage {
    intro_heading: INTRO_HEADING.to_string(),
    intro_content: INTRO_CONTENT.clone(),
    audio_enabled: true,
    audio_url: AUDIO_URL.to_string(),
    audio_name: AUDIO_NAME.to_string(),
    coming_soon_label: COMING_SOON_LABEL.to_string(),
    coming_soon_heading: COMING_SOON_HEADING.to_string(),
    coming_soon_cards: CARDS.clone(),
    share_vision_label: SHARE_VISION_LABEL.to_string(),
    share_vision_heading: SHARE_VISION_HEADING.to_string(),
    share_vision_description: SHARE_VISION_DESCRIPTION.clone(),
    share_vision_button_text: SHARE_VISION_BUTTON_TEXT.to_string(),
    share_vision_button_link: SHARE_VISION_BUTTON_LINK.to_string(),
    address: ADDRESS.to_string(),
    social_networks: SOCIAL_NETWORKS.clone(),
    seo_title: String::new(),
    seo_description: String::new(),
    seo_keywords: String::new(),
});

pub static INTRO_CONTENT: Lazy<RichText> =
    Lazy::new(|| Document::from_lines(INTRO_PARAGRAPHS).into());

pub static SHARE_VISION_DESCRIPTION: Lazy<RichText> = Lazy::new(|| {
    Document::from_blocks(vec![BlockNode::paragraph(vec![
        InlineNode::text(
            "We invite you to explore the ideas, ambitions, and forces driving India toward its next horizon. ",
        ),
        InlineNode::line_break(),
        InlineNode::text("Contact us to share your ideas."),
    ])])
    .into()
});

pub static CARDS: Lazy<Vec<PublicCard>> = Lazy::new(|| {
    [
        (
            "Interviews",
            "Vision interviews of\nluminaries from\nvaried fields",
            "/images/interviews.webp",
            "#FFF1E7",
            "#EF671F",
            "/images/interview-gradient.png",
        ),
        (
            "Podcasts",
            "Podcasts featuring\ninsightful discussions on\nIndia's growth story",
            "/images/podcasts.webp",
            "#F2F2F2",
            "#535353",
            "/images/podcast-gradient.png",
        ),
        (
            "Events",
            "Events to engage,\nlearn, and collaborate\nwith leaders",
            "/images/events.webp",
            "#D4EBE0",
            "#046A38",
            "/images/event-gradient.png",
        ),
    ]
    .into_iter()
    .map(
        |(title, description, image, background_color, text_color, background_image)| PublicCard {
            title: title.to_string(),
            description: from_plain_text(description),
            image: image.to_string(),
            background_color: background_color.to_string(),
            text_color: text_color.to_string(),
            background_image: Some(background_image.to_string()),
        },
    )
    .collect()
});

pub static SOCIAL_NETWORKS: Lazy<Vec<SocialNetwork>> = Lazy::new(|| {
    [
        ("LinkedIn", "https://www.linkedin.com/showcase/one-big-future/about/"),
        ("Instagram", "https://www.instagram.com/one_big_future/"),
        ("YouTube", "https://www.youtube.com/@OneBigFuture"),
        ("X (Formerly Twitter)", "https://x.com/onebigfuture"),
        ("Facebook", "https://www.facebook.com/profile.php?id=61586251529727"),
    ]
    .into_iter()
    .zip(0..)
    .map(|((name, url), order)| SocialNetwork {
        name: name.to_string(),
        url: url.to_string(),
        enabled: true,
        order,
    })
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payload_is_fully_populated() {
        let page = &*PUBLIC_HOMEPAGE;

        assert_eq!(page.intro_heading, "India In The 21st Century");
        assert_eq!(page.audio_url, "/audio/obf-intro.mp3");
        assert_eq!(page.coming_soon_cards.len(), 3);
        assert_eq!(page.social_networks.len(), 5);
        assert!(page.social_networks.windows(2).all(|w| w[0].order < w[1].order));
        assert_eq!(page.intro_content.to_plain_text().lines().count(), 4);
    }

    #[test]
    fn test_share_vision_description_keeps_line_break() {
        assert_eq!(
            SHARE_VISION_DESCRIPTION.to_plain_text(),
            "We invite you to explore the ideas, ambitions, and forces driving India toward its next horizon. \nContact us to share your ideas."
        );
    }
}
