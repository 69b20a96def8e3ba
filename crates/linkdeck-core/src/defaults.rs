//! Built-in starter collection.
//!
//! Used when neither the remote store nor the local cache has anything,
//! so a first launch lands on a populated deck instead of an empty page.

use crate::collection::{favicon_url_for, Collection, LinkCategory, LinkItem};

fn link(id: &str, name: &str, url: &str, description: &str) -> LinkItem {
    LinkItem {
        id: id.into(),
        name: name.into(),
        url: url.into(),
        favicon_url: favicon_url_for(url),
        description: description.into(),
    }
}

fn category(title: &str, links: Vec<LinkItem>) -> LinkCategory {
    LinkCategory {
        title: title.into(),
        links,
    }
}

/// The collection a fresh deployment starts with.
pub fn default_collection() -> Collection {
    Collection::new(vec![
        category(
            "Google Apps",
            vec![
                link("g-1", "Gmail", "https://mail.google.com/", "Email service"),
                link("g-2", "Drive", "https://drive.google.com/", "Cloud storage"),
                link("g-3", "Calendar", "https://calendar.google.com/", "Scheduling app"),
                link("g-4", "Photos", "https://photos.google.com/", "Photo hosting"),
                link("g-5", "Keep", "https://keep.google.com/", "Note-taking"),
                link("g-6", "Meet", "https://meet.google.com/", "Video conferencing"),
            ],
        ),
        category(
            "Development",
            vec![
                link("d-1", "GitHub", "https://github.com/", "Code hosting"),
                link("d-2", "GitLab", "https://gitlab.com/", "DevOps platform"),
                link("d-3", "Stack Overflow", "https://stackoverflow.com/", "Q&A for programmers"),
                link("d-4", "VS Code", "https://vscode.dev/", "Online code editor"),
                link("d-5", "npm", "https://www.npmjs.com/", "Package manager"),
                link("d-6", "Postman", "https://web.postman.co/", "API platform"),
            ],
        ),
        category(
            "AI / ML",
            vec![
                link("a-1", "ChatGPT", "https://chat.openai.com/", "Conversational AI"),
                link("a-2", "Google Gemini", "https://gemini.google.com/", "Creative AI assistant"),
                link("a-3", "Hugging Face", "https://huggingface.co/", "AI community"),
                link("a-4", "Perplexity AI", "https://www.perplexity.ai/", "Conversational search"),
            ],
        ),
        category(
            "Hosting / Cloud",
            vec![
                link("h-1", "Vercel", "https://vercel.com/", "Frontend cloud"),
                link("h-2", "Netlify", "https://www.netlify.com/", "Web development platform"),
                link("h-3", "Firebase", "https://console.firebase.google.com/", "App development"),
                link("h-4", "AWS Console", "https://aws.amazon.com/console/", "Cloud computing"),
                link("h-5", "Cloudflare", "https://www.cloudflare.com/dash", "Web performance"),
            ],
        ),
        category(
            "Design",
            vec![
                link("ds-1", "Figma", "https://www.figma.com/", "Collaborative design"),
                link("ds-2", "Dribbble", "https://dribbble.com/", "Design portfolio"),
                link("ds-3", "Canva", "https://www.canva.com/", "Graphic design tool"),
                link("ds-4", "Coolors", "https://coolors.co/", "Color palettes"),
                link("ds-5", "Unsplash", "https://unsplash.com/", "Stock photos"),
            ],
        ),
        category(
            "Tools",
            vec![
                link("t-1", "Notion", "https://www.notion.so/", "Workspace tool"),
                link("t-2", "Trello", "https://trello.com/", "Project management"),
                link("t-3", "Slack", "https://slack.com/", "Team communication"),
                link("t-4", "Discord", "https://discord.com/app", "VoIP and chat"),
            ],
        ),
        category(
            "Social",
            vec![
                link("s-1", "LinkedIn", "https://www.linkedin.com/", "Professional network"),
                link("s-2", "Twitter / X", "https://twitter.com/", "Social media"),
                link("s-3", "Instagram", "https://www.instagram.com/", "Photo sharing"),
                link("s-4", "Facebook", "https://www.facebook.com/", "Social network"),
            ],
        ),
        category(
            "Others",
            vec![
                link("o-1", "YouTube", "https://www.youtube.com/", "Video sharing"),
                link("o-2", "Medium", "https://medium.com/", "Online publishing"),
                link("o-3", "Spotify", "https://open.spotify.com/", "Music streaming"),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collection_is_well_formed() {
        let collection = default_collection();
        assert_eq!(collection.len(), 8);
        assert_eq!(collection.link_count(), 37);
        assert_eq!(collection.duplicate_title(), None);
        assert_eq!(collection.duplicate_link_id(), None);
        assert!(collection.categories.iter().all(|c| !c.links.is_empty()));
    }

    #[test]
    fn test_default_favicons_are_derived() {
        let collection = default_collection();
        let (_, gmail) = collection.find_link("g-1").unwrap();
        assert_eq!(gmail.favicon_url, favicon_url_for("https://mail.google.com/"));
    }

    #[test]
    fn test_default_urls_are_distinct_after_normalization() {
        let collection = default_collection();
        let mut seen = std::collections::HashSet::new();
        for category in &collection.categories {
            for link in &category.links {
                assert!(
                    seen.insert(crate::urlnorm::normalize(&link.url)),
                    "duplicate normalized URL: {}",
                    link.url
                );
            }
        }
    }
}
