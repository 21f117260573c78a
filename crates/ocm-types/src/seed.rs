use crate::material::{Category, MaterialRecord};

/// The sample collection written the first time an empty slot is read.
///
/// `now_ms` anchors the `date_added` offsets so repeated seeding in tests is
/// deterministic.
pub fn seed_materials(now_ms: i64) -> Vec<MaterialRecord> {
    vec![
        MaterialRecord {
            id: "1".into(),
            title: "Vintage leather texture".into(),
            description: "High-resolution worn leather, ideal for belts and boots. \
                          Includes a seamless tiling pattern."
                .into(),
            category: Category::Texture,
            image_url: "https://picsum.photos/id/102/400/300".into(),
            download_url: "#".into(),
            author: "Design Master".into(),
            downloads: 124,
            date_added: now_ms - 100_000,
        },
        MaterialRecord {
            id: "2".into(),
            title: "Cyberpunk city background".into(),
            description: "Neon-lit street scene for futuristic OC showcases. \
                          4K resolution with several lighting layers."
                .into(),
            category: Category::Background,
            image_url: "https://picsum.photos/id/122/400/300".into(),
            download_url: "#".into(),
            author: "Neon Dreams".into(),
            downloads: 89,
            date_added: now_ms - 200_000,
        },
        MaterialRecord {
            id: "3".into(),
            title: "Watercolor brush pack".into(),
            description: "Twelve natural watercolor brushes for soft shading and \
                          organic textures."
                .into(),
            category: Category::Brush,
            image_url: "https://picsum.photos/id/106/400/300".into(),
            download_url: "#".into(),
            author: "Art Soul".into(),
            downloads: 342,
            date_added: now_ms - 50_000,
        },
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_has_three_unique_records() {
        let seed = seed_materials(1_000_000);
        assert_eq!(seed.len(), 3);
        let downloads: Vec<u64> = seed.iter().map(|m| m.downloads).collect();
        assert_eq!(downloads, vec![124, 89, 342]);
        let ids: HashSet<&str> = seed.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }
}
