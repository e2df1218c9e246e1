use crate::models::{Property, PropertyType};

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    description: &str,
    price: i64,
    location: &str,
    kind: PropertyType,
    bedrooms: u32,
    bathrooms: f32,
    area: u32,
    image: &str,
    featured: bool,
) -> Property {
    Property {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        location: location.to_string(),
        kind,
        bedrooms,
        bathrooms,
        area,
        image: image.to_string(),
        featured,
    }
}

/// Listings written to an empty `properties` collection on first start
pub fn sample_properties() -> Vec<Property> {
    vec![
        listing(
            "1",
            "Modern Apartment with City View",
            "A beautiful modern apartment with stunning city views. Features include a fully equipped kitchen, spacious living area, and private balcony. Located in a prime downtown location with easy access to public transportation, restaurants, and shopping centers.",
            1_500,
            "Downtown, New York",
            PropertyType::Rent,
            2,
            1.0,
            850,
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267",
            true,
        ),
        listing(
            "2",
            "Luxury Waterfront Villa",
            "Spectacular waterfront villa with panoramic ocean views. This luxury property features high-end finishes, a private pool, spacious entertainment areas, and direct beach access. Perfect for those seeking a high-end coastal lifestyle.",
            2_500_000,
            "Malibu, California",
            PropertyType::Sale,
            5,
            4.0,
            3_200,
            "https://images.unsplash.com/photo-1512917774080-9991f1c4c750",
            true,
        ),
        listing(
            "3",
            "Cozy Studio in Historic District",
            "Charming studio apartment in a historic building. Features exposed brick walls, hardwood floors, and modern amenities. Ideally located in the heart of the historic district with cafes, boutiques, and cultural attractions just steps away.",
            900,
            "Boston, Massachusetts",
            PropertyType::Rent,
            0,
            1.0,
            450,
            "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af",
            false,
        ),
        listing(
            "4",
            "Suburban Family Home",
            "Spacious family home in a quiet suburban neighborhood. Features a large backyard, renovated kitchen, and comfortable living spaces. Located near excellent schools, parks, and shopping centers. Perfect for families looking for a safe and friendly community.",
            450_000,
            "Naperville, Illinois",
            PropertyType::Sale,
            4,
            2.5,
            2_100,
            "https://images.unsplash.com/photo-1568605114967-8130f3a36994",
            false,
        ),
        listing(
            "5",
            "Penthouse with Rooftop Terrace",
            "Luxurious penthouse featuring a private rooftop terrace with 360-degree views. This premium property includes high ceilings, floor-to-ceiling windows, and premium finishes throughout. Building amenities include a fitness center, pool, and 24-hour concierge.",
            3_500,
            "Chicago, Illinois",
            PropertyType::Rent,
            3,
            2.0,
            1_800,
            "https://images.unsplash.com/photo-1493809842364-78817add7ffb",
            true,
        ),
        listing(
            "6",
            "Mountain Retreat Cabin",
            "Rustic yet modern cabin nestled in the mountains. Features include a stone fireplace, vaulted ceilings, and wraparound deck with breathtaking views. Perfect as a vacation home or for those seeking a peaceful mountain lifestyle away from the city.",
            375_000,
            "Aspen, Colorado",
            PropertyType::Sale,
            3,
            2.0,
            1_650,
            "https://images.unsplash.com/photo-1518780664697-55e3ad937233",
            false,
        ),
    ]
}
