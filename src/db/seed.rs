//! Built-in records written the first time a collection is accessed.

use crate::models::{Photo, Post};

const SLOW_LIVING: &str = "In a world that constantly demands our attention, finding silence is an act of rebellion. 

> \"Nature does not hurry, yet everything is accomplished.\" - Lao Tzu

Yesterday, I took a walk through the autumn woods. The leaves were turning that crisp, burnt orange color that only exists for a few weeks a year. It reminded me that transitions are beautiful, even when they signify an ending.

We often rush through our days, ticking off boxes, forgetting to actually *live* them. What if we just stopped? Just for a moment. To breathe. To listen. To be.

The coffee tasted better this morning. The sunlight hitting my desk felt warmer. It's the little things that anchor us.";

const MINIMALIST_INTERIOR: &str = "Minimalism isn't just about having less stuff; it's about making room for more of what matters. 

I recently cleared out my study. Three boxes of old papers, broken pens, and books I'll never read again. The physical space cleared, and suddenly, my mental space followed suit.

> Less is more.

Try it this weekend. Pick one corner. Just one. Clear it. See how you feel.";

/// Posts seeded into an empty store, newest first.
pub fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            title: "The Art of Slow Living".to_string(),
            excerpt:
                "Rediscovering the beauty of taking things one step at a time in a chaotic world."
                    .to_string(),
            content: SLOW_LIVING.to_string(),
            cover_image: "https://picsum.photos/800/600?random=1".to_string(),
            date: "2023-10-15".to_string(),
            tags: vec!["Mindfulness".to_string()],
            category: "Lifestyle".to_string(),
        },
        Post {
            id: "2".to_string(),
            title: "Minimalist Interior Trends".to_string(),
            excerpt: "How to declutter your space and your mind with simple design principles."
                .to_string(),
            content: MINIMALIST_INTERIOR.to_string(),
            cover_image: "https://picsum.photos/800/600?random=2".to_string(),
            date: "2023-11-02".to_string(),
            tags: vec!["Interior".to_string()],
            category: "Design".to_string(),
        },
    ]
}

/// Photos seeded into an empty store.
pub fn default_photos() -> Vec<Photo> {
    [
        ("1", "https://picsum.photos/400/600?random=10", "Morning light"),
        ("2", "https://picsum.photos/400/400?random=11", "Coffee breaks"),
        ("3", "https://picsum.photos/400/500?random=12", "City shadows"),
        ("4", "https://picsum.photos/400/300?random=13", "Mountain view"),
        ("5", "https://picsum.photos/400/600?random=14", "Reading corner"),
        ("6", "https://picsum.photos/400/400?random=15", "Textures"),
    ]
    .into_iter()
    .map(|(id, url, caption)| Photo {
        id: id.to_string(),
        url: url.to_string(),
        caption: caption.to_string(),
    })
    .collect()
}
