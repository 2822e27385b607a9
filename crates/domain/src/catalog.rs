//! The built-in exercise catalog: the global exercises available to every
//! user. Custom exercises are stored per user and are not part of this list.

pub struct Exercise {
    pub name: &'static str,
    pub video_url: Option<&'static str>,
}

pub const EXERCISES: &[Exercise] = &[
    Exercise {
        name: "Barbell Bench Press",
        video_url: Some("https://www.youtube.com/watch?v=rT7DgCr-3pg"),
    },
    Exercise {
        name: "Barbell Squat",
        video_url: Some("https://www.youtube.com/watch?v=ultWZbUMPL8"),
    },
    Exercise {
        name: "Barbell Deadlift",
        video_url: Some("https://www.youtube.com/watch?v=op9kVnSso6Q"),
    },
    Exercise {
        name: "Overhead Press",
        video_url: Some("https://www.youtube.com/watch?v=2yjwXTZQDDI"),
    },
    Exercise {
        name: "Barbell Row",
        video_url: Some("https://www.youtube.com/watch?v=9efgcAjQe7E"),
    },
    Exercise {
        name: "Pull-ups",
        video_url: Some("https://www.youtube.com/watch?v=eGo4IYlbE5g"),
    },
    Exercise {
        name: "Dumbbell Lateral Raise",
        video_url: Some("https://www.youtube.com/watch?v=3VcKaXpzqRo"),
    },
    Exercise {
        name: "Leg Press",
        video_url: Some("https://www.youtube.com/watch?v=IZxyjW7MPJQ"),
    },
    Exercise {
        name: "Romanian Deadlift",
        video_url: Some("https://www.youtube.com/watch?v=2SHsk9AzdjA"),
    },
    Exercise {
        name: "Incline Dumbbell Press",
        video_url: Some("https://www.youtube.com/watch?v=8iPEnn-ltC8"),
    },
];
