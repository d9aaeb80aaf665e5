//! Fixture data for prototype builds, demos, and tests.
//!
//! The prototype has no backend; every screen load starts from these
//! fixed arrays. The scatter is arranged so hotspot detection has
//! something to find: a dense knot near the student union, a smaller
//! one by the library, and a few isolated tasks that should never
//! cluster.

use crate::{
    GeoPoint, SafeMeetingPoint, SafePointCategory, Task, TaskCategory, TaskStatus,
};

/// Default map region center (matches the app's initial camera).
pub const CAMPUS_CENTER: GeoPoint = GeoPoint {
    latitude: 37.78825,
    longitude: -122.4324,
};

fn task(
    id: &str,
    title: &str,
    description: &str,
    lat: f64,
    lng: f64,
    pay: f64,
    category: TaskCategory,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        location: GeoPoint::new(lat, lng),
        pay,
        status: TaskStatus::Open,
        category: Some(category),
        pickup: None,
        dropoff: None,
    }
}

/// The mock task feed.
pub fn sample_tasks() -> Vec<Task> {
    let mut tasks = vec![
        // Knot around the student union
        task(
            "t-1",
            "Print and deliver lab report",
            "20 pages, stapled, to the chemistry building front desk",
            37.78825,
            -122.43240,
            6.0,
            TaskCategory::Errand,
        ),
        task(
            "t-2",
            "Coffee run",
            "Two flat whites from the union cafe, tip included",
            37.78846,
            -122.43221,
            5.5,
            TaskCategory::Errand,
        ),
        task(
            "t-3",
            "Calculus tutoring, 1h",
            "Integration by parts before Thursday's midterm",
            37.78861,
            -122.43252,
            25.0,
            TaskCategory::Tutoring,
        ),
        task(
            "t-4",
            "Poster pickup",
            "Collect 3 printed posters from the copy shop",
            37.78838,
            -122.43266,
            8.0,
            TaskCategory::Errand,
        ),
        task(
            "t-5",
            "Sell spare concert ticket",
            "Tonight, will meet anywhere near the union",
            37.78810,
            -122.43228,
            15.0,
            TaskCategory::Other,
        ),
        // Smaller knot by the main library
        task(
            "t-6",
            "Return library books",
            "Three books, due today, box outside works",
            37.79102,
            -122.42958,
            4.0,
            TaskCategory::Errand,
        ),
        task(
            "t-7",
            "Study-room swap",
            "Hold room 204B from 6pm until I arrive",
            37.79115,
            -122.42940,
            7.0,
            TaskCategory::Other,
        ),
        task(
            "t-8",
            "Essay proofread",
            "2,000 words, history, due tomorrow morning",
            37.79095,
            -122.42971,
            18.0,
            TaskCategory::Tutoring,
        ),
        task(
            "t-9",
            "Charge my scooter",
            "Battery pack swap, charger provided",
            37.79124,
            -122.42966,
            9.0,
            TaskCategory::Errand,
        ),
        // Isolated tasks that should never cluster
        task(
            "t-10",
            "Help move a desk",
            "Second floor to ground floor, two people enough",
            37.78120,
            -122.44010,
            30.0,
            TaskCategory::Moving,
        ),
        task(
            "t-11",
            "Dog walk, 30 min",
            "Friendly beagle, leash by the door",
            37.79610,
            -122.42110,
            12.0,
            TaskCategory::Other,
        ),
        task(
            "t-12",
            "Jump-start a car",
            "North lot, cables provided",
            37.78350,
            -122.41780,
            20.0,
            TaskCategory::Other,
        ),
    ];

    // Delivery variant with explicit pickup and dropoff
    let mut groceries = task(
        "t-13",
        "Grocery drop",
        "One bag from the market to the dorms, perishables",
        37.78870,
        -122.43190,
        14.0,
        TaskCategory::Delivery,
    );
    groceries.pickup = Some(GeoPoint::new(37.78770, -122.43350));
    groceries.dropoff = Some(GeoPoint::new(37.79230, -122.42840));
    tasks.push(groceries);

    tasks
}

/// Static safe meeting points shown on the safety overlay.
pub fn safe_meeting_points() -> Vec<SafeMeetingPoint> {
    vec![
        SafeMeetingPoint {
            name: "Main Library Entrance".to_string(),
            location: GeoPoint::new(37.79108, -122.42950),
            category: SafePointCategory::Library,
        },
        SafeMeetingPoint {
            name: "Student Union Lobby".to_string(),
            location: GeoPoint::new(37.78840, -122.43235),
            category: SafePointCategory::StudentCenter,
        },
        SafeMeetingPoint {
            name: "Campus Security Office".to_string(),
            location: GeoPoint::new(37.78990, -122.43510),
            category: SafePointCategory::CampusSecurity,
        },
        SafeMeetingPoint {
            name: "North Gate Cafe".to_string(),
            location: GeoPoint::new(37.79320, -122.43080),
            category: SafePointCategory::Cafe,
        },
        SafeMeetingPoint {
            name: "Transit Plaza".to_string(),
            location: GeoPoint::new(37.78560, -122.42740),
            category: SafePointCategory::TransitHub,
        },
    ]
}
