//! Demo data generation.
//!
//! Fills the stores with plausible spots and reviews for local
//! development. Records go through the regular `create` operations, so
//! every seeded spot starts with zero likes and a fresh `created_at`.

use campusspot_core::error::CampusResult;
use campusspot_core::models::review::CreateReview;
use campusspot_core::models::spot::{CreateSpot, NoiseLevel};
use campusspot_core::repository::{ReviewRepository, SpotRepository};
use rand::Rng;
use tracing::info;

pub const DEFAULT_SPOT_COUNT: usize = 100;
pub const DEFAULT_REVIEW_COUNT: usize = 1000;

/// Probability that a generated spot has an outlet.
const OUTLET_PROBABILITY: f64 = 0.7;

const BUILDINGS: &[&str] = &[
    "Library",
    "Science Center",
    "Student Union",
    "Engineering Building",
    "Arts Hall",
    "Business School",
    "Medical Building",
    "Law School",
    "Computer Science Building",
    "Mathematics Department",
    "Physics Building",
];

const FLOORS: &[&str] = &[
    "1st Floor",
    "2nd Floor",
    "3rd Floor",
    "Basement",
    "Ground Floor",
    "Mezzanine",
];

const SPOT_NAMES: &[&str] = &[
    "Corner Table",
    "Window Nook",
    "Study Carrel",
    "Group Table",
    "Lounge Area",
    "Private Room",
    "Quiet Zone",
    "Collaborative Space",
    "Hidden Spot",
    "Comfy Couch Area",
    "Coffee Shop Corner",
    "Reading Room",
    "Tech Hub",
    "Whiteboard Station",
    "Standing Desk Area",
    "Garden View",
    "Atrium Seats",
    "Media Center",
    "Conference Room",
    "Computer Lab",
];

const COMMENTS: &[&str] = &[
    "Great spot for focus work!",
    "Too noisy during peak hours.",
    "Comfortable seating and good lighting.",
    "WiFi can be spotty here.",
    "Perfect for group study sessions.",
    "Hard to find an open spot during finals.",
    "Outlets are conveniently located.",
    "Love the natural lighting here.",
    "Could use more comfortable chairs.",
    "My go-to spot for cramming before exams.",
    "Quiet and peaceful atmosphere.",
    "Can get crowded between classes.",
    "Staff is very helpful.",
    "Temperature is always perfect here.",
    "Best view on campus!",
    "A hidden gem for focused studying.",
    "Good spot but limited seating.",
    "Great for both individual and group work.",
    "Needs more power outlets.",
    "Clean and well-maintained.",
    "A bit isolated but good for concentration.",
    "Close to food options, which is convenient.",
    "Tables are a good size for spreading out materials.",
    "Chairs could be more ergonomic.",
    "Excellent spot to meet for group projects.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub spots: usize,
    pub reviews: usize,
}

fn pick<'a, G: Rng + ?Sized>(rng: &mut G, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

pub fn generate_spots<G: Rng + ?Sized>(rng: &mut G, count: usize) -> Vec<CreateSpot> {
    (0..count)
        .map(|_| {
            let building = pick(rng, BUILDINGS);
            let name = format!("{} in {building}", pick(rng, SPOT_NAMES));
            let noise_level = NoiseLevel::ALL[rng.random_range(0..NoiseLevel::ALL.len())];

            CreateSpot {
                name: Some(name),
                building: Some(building.to_string()),
                floor: Some(pick(rng, FLOORS).to_string()),
                has_outlet: Some(rng.random_bool(OUTLET_PROBABILITY)),
                noise_level: Some(noise_level),
            }
        })
        .collect()
}

/// Reviews attached to random entries of `spot_ids`. Empty when there
/// are no spots to attach to.
pub fn generate_reviews<G: Rng + ?Sized>(
    rng: &mut G,
    spot_ids: &[String],
    count: usize,
) -> Vec<CreateReview> {
    if spot_ids.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| CreateReview {
            spot_id: spot_ids[rng.random_range(0..spot_ids.len())].clone(),
            rating: rng.random_range(1..=5),
            comment: pick(rng, COMMENTS).to_string(),
        })
        .collect()
}

pub async fn seed<S, R>(
    spots: &S,
    reviews: &R,
    spot_count: usize,
    review_count: usize,
) -> CampusResult<SeedSummary>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    info!(spot_count, "Generating spots");
    let spot_inputs = generate_spots(&mut rand::rng(), spot_count);

    let mut spot_ids = Vec::with_capacity(spot_inputs.len());
    for input in spot_inputs {
        let spot = spots.create(input).await?;
        spot_ids.push(spot.id.to_string());
    }
    info!(inserted = spot_ids.len(), "Inserted spots");

    info!(review_count, "Generating reviews");
    let review_inputs = generate_reviews(&mut rand::rng(), &spot_ids, review_count);

    let mut inserted_reviews = 0;
    for input in review_inputs {
        reviews.create(input).await?;
        inserted_reviews += 1;
    }
    info!(inserted = inserted_reviews, "Inserted reviews");

    Ok(SeedSummary {
        spots: spot_ids.len(),
        reviews: inserted_reviews,
    })
}
