//! Seed data for the demo event, anchored to a reference time.

use chrono::{DateTime, Duration, Utc};

use ecoevent_core::model::{
    Agency, AgencyId, Attendee, AttendeeId, Bin, BinCategory, BinId, DisposalGuideline,
    MaintenanceAction, MaintenanceRecord, RecyclingPoint,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|&item| item.to_owned()).collect()
}

fn maintenance(
    anchor: DateTime<Utc>,
    entries: &[(i64, MaintenanceAction, &str)],
) -> Vec<MaintenanceRecord> {
    entries
        .iter()
        .map(|&(hours_ago, action, notes)| MaintenanceRecord {
            timestamp: anchor - Duration::hours(hours_ago),
            action,
            notes: Some(notes.to_owned()),
        })
        .collect()
}

pub(crate) fn bins(anchor: DateTime<Utc>) -> Vec<Bin> {
    let last_emptied = anchor - Duration::hours(30);
    vec![
        Bin {
            id: BinId(String::from("bin-1")),
            location: String::from("Main Entrance"),
            category: BinCategory::Recyclable,
            current_level: 30.0,
            capacity: 100.0,
            last_emptied,
            sensor_id: Some(String::from("sensor-1")),
            maintenance_history: maintenance(
                anchor,
                &[
                    (30, MaintenanceAction::Emptied, "Regular collection"),
                    (54, MaintenanceAction::Cleaned, "Deep cleaning performed"),
                    (75, MaintenanceAction::Repaired, "Sensor calibration"),
                    (102, MaintenanceAction::Emptied, "Regular collection"),
                ],
            ),
        },
        Bin {
            id: BinId(String::from("bin-2")),
            location: String::from("Food Court"),
            category: BinCategory::Compost,
            current_level: 75.0,
            capacity: 100.0,
            last_emptied,
            sensor_id: Some(String::from("sensor-2")),
            maintenance_history: maintenance(
                anchor,
                &[
                    (30, MaintenanceAction::Emptied, "Regular collection"),
                    (78, MaintenanceAction::Emptied, "Regular collection"),
                ],
            ),
        },
        Bin {
            id: BinId(String::from("bin-3")),
            location: String::from("Exhibition Hall"),
            category: BinCategory::General,
            current_level: 60.0,
            capacity: 100.0,
            last_emptied,
            sensor_id: None,
            maintenance_history: maintenance(
                anchor,
                &[(9 * 24, MaintenanceAction::Cleaned, "Lid hinge replaced")],
            ),
        },
        Bin {
            id: BinId(String::from("bin-4")),
            location: String::from("Main Stage"),
            category: BinCategory::Recyclable,
            current_level: 205.0,
            capacity: 240.0,
            last_emptied: anchor - Duration::hours(18),
            sensor_id: Some(String::from("sensor-4")),
            maintenance_history: Vec::new(),
        },
    ]
}

pub(crate) fn attendees(anchor: DateTime<Utc>) -> Vec<Attendee> {
    vec![
        Attendee {
            id: AttendeeId(String::from("1")),
            name: String::from("Hemant Singh"),
            points: 150,
            history: vec![
                RecyclingPoint {
                    points: 50,
                    actions: strings(&["Recycled 10 bottles"]),
                    timestamp: anchor - Duration::hours(29),
                    bin_id: Some(BinId(String::from("bin-1"))),
                    verified_by: Some(String::from("sensor-1")),
                },
                RecyclingPoint {
                    points: 100,
                    actions: strings(&["Composted food waste", "Used reusable container"]),
                    timestamp: anchor - Duration::hours(6),
                    bin_id: Some(BinId(String::from("bin-2"))),
                    verified_by: Some(String::from("staff-1")),
                },
            ],
            badges: strings(&["Early Adopter", "Recycling Pro", "Compost Master"]),
            level: Some(2),
            total_waste_saved_kg: Some(45.5),
        },
        Attendee {
            id: AttendeeId(String::from("2")),
            name: String::from("Maya Chen"),
            points: 1020,
            history: vec![
                RecyclingPoint {
                    points: 520,
                    actions: strings(&["Volunteered at sorting station"]),
                    timestamp: anchor - Duration::hours(26),
                    bin_id: None,
                    verified_by: Some(String::from("staff-2")),
                },
                RecyclingPoint {
                    points: 500,
                    actions: strings(&[
                        "Recycled 40 cans",
                        "Returned event cup",
                        "Sorted booth packaging",
                    ]),
                    timestamp: anchor - Duration::hours(3),
                    bin_id: Some(BinId(String::from("bin-4"))),
                    verified_by: Some(String::from("sensor-4")),
                },
            ],
            badges: strings(&["Sorting Volunteer"]),
            level: None,
            total_waste_saved_kg: Some(112.0),
        },
    ]
}

pub(crate) fn guidelines() -> Vec<DisposalGuideline> {
    vec![
        DisposalGuideline {
            waste_type: String::from("Plastic Bottles"),
            instructions: String::from("Empty and rinse before disposing. Remove caps and labels."),
            category: BinCategory::Recyclable,
            image_url: String::from(
                "https://images.unsplash.com/photo-1605600659908-0ef719419d41?auto=format&fit=crop&q=80&w=400",
            ),
            tips: strings(&[
                "Crush bottles to save space",
                "Remove all liquid contents",
                "Check bottom for recycling number",
                "Clean and dry before disposal",
                "Separate caps and labels",
                "No oil-contaminated bottles",
            ]),
            environmental_impact: String::from(
                "Takes 450 years to decompose in nature. Recycling one plastic bottle saves enough energy to power a 60-watt light bulb for 6 hours.",
            ),
            qr_code: None,
        },
        DisposalGuideline {
            waste_type: String::from("Food Waste"),
            instructions: String::from("All food scraps go in the compost bin. No packaging."),
            category: BinCategory::Compost,
            image_url: String::from(
                "https://images.unsplash.com/photo-1516211697506-8360dbcfe9a4?auto=format&fit=crop&q=80&w=400",
            ),
            tips: strings(&[
                "No meat or dairy products",
                "Break down large pieces",
                "Mix with brown materials",
                "Keep moisture balanced",
                "Include fruit and vegetable scraps",
                "Coffee grounds and tea bags accepted",
                "Eggshells are welcome",
            ]),
            environmental_impact: String::from(
                "Produces methane in landfills. Composting reduces greenhouse gas emissions and creates nutrient-rich soil.",
            ),
            qr_code: None,
        },
        DisposalGuideline {
            waste_type: String::from("Paper Products"),
            instructions: String::from("Flatten cardboard boxes. Keep paper clean and dry."),
            category: BinCategory::Recyclable,
            image_url: String::from(
                "https://images.unsplash.com/photo-1589634749000-1e72ec00a13f?auto=format&fit=crop&q=80&w=400",
            ),
            tips: strings(&[
                "Remove tape and staples",
                "No food-contaminated paper",
                "Bundle newspapers together",
                "Shred sensitive documents",
                "Remove plastic windows from envelopes",
                "Break down boxes completely",
            ]),
            environmental_impact: String::from(
                "Saves 17 trees per ton recycled. Reduces water pollution by 35% and air pollution by 74%.",
            ),
            qr_code: None,
        },
        DisposalGuideline {
            waste_type: String::from("Glass Containers"),
            instructions: String::from("Rinse thoroughly. Remove lids and caps."),
            category: BinCategory::Recyclable,
            image_url: String::from(
                "https://images.unsplash.com/photo-1550438496-40dd3b1a66a5?auto=format&fit=crop&q=80&w=400",
            ),
            tips: strings(&[
                "Sort by color if required",
                "Remove metal and plastic lids",
                "No broken glass",
                "No window glass or mirrors",
                "No ceramics or pottery",
                "Labels can stay on",
            ]),
            environmental_impact: String::from(
                "Glass is 100% recyclable and can be recycled endlessly without loss in quality or purity.",
            ),
            qr_code: None,
        },
        DisposalGuideline {
            waste_type: String::from("Electronics"),
            instructions: String::from("Remove batteries. Handle with care."),
            category: BinCategory::General,
            image_url: String::from(
                "https://images.unsplash.com/photo-1550009158-9ebf69173e03?auto=format&fit=crop&q=80&w=400",
            ),
            tips: strings(&[
                "Remove personal data",
                "Separate batteries",
                "Keep cords untangled",
                "Handle screens carefully",
                "Check for special disposal requirements",
                "Consider donating working items",
            ]),
            environmental_impact: String::from(
                "E-waste contains toxic materials. Proper recycling prevents soil and water contamination.",
            ),
            qr_code: None,
        },
        DisposalGuideline {
            waste_type: String::from("Garden Waste"),
            instructions: String::from("Cut large branches. Remove non-organic materials."),
            category: BinCategory::Compost,
            image_url: String::from(
                "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?auto=format&fit=crop&q=80&w=400",
            ),
            tips: strings(&[
                "Chop branches into small pieces",
                "Mix green and brown materials",
                "Remove any plastic ties",
                "No treated wood",
                "Include grass clippings",
                "Leaves are excellent for composting",
            ]),
            environmental_impact: String::from(
                "Composting garden waste reduces methane emissions and creates valuable fertilizer.",
            ),
            qr_code: None,
        },
    ]
}

pub(crate) fn agencies(anchor: DateTime<Utc>) -> Vec<Agency> {
    vec![
        Agency {
            id: AgencyId(String::from("1")),
            name: String::from("GreenCycle Solutions"),
            contact: String::from("contact@greencycle.com"),
            specializations: strings(&["Plastic", "Paper", "Electronics"]),
            availability: String::from("24/7"),
            rating: Some(4.7),
            last_pickup: Some(anchor - Duration::hours(30)),
            next_scheduled_pickup: Some(anchor + Duration::hours(18)),
        },
        Agency {
            id: AgencyId(String::from("2")),
            name: String::from("EcoWaste Management"),
            contact: String::from("support@ecowaste.com"),
            specializations: strings(&["Organic Waste", "Composting"]),
            availability: String::from("Mon-Sat, 8AM-6PM"),
            rating: None,
            last_pickup: None,
            next_scheduled_pickup: None,
        },
    ]
}
