//! Built-in sample profiles used to seed an empty store

use crate::profile::Profile;

/// Number of profiles in the sample set
pub const SAMPLE_PROFILE_COUNT: usize = 8;

/// The fixed sample set, ids "1" through "8"
#[must_use]
pub fn sample_profiles() -> Vec<Profile> {
    vec![
        Profile::new("1", "John Doe")
            .with_description(
                "Software Engineer with 5 years of experience in React and Node.js. Passionate about building user-friendly web applications.",
            )
            .with_location(40.7128, -74.006)
            .with_address("New York, NY")
            .with_email("john.doe@example.com")
            .with_phone("+1 (555) 123-4567")
            .with_interests(["Coding", "Hiking", "Photography", "Reading"])
            .with_social("twitter", "johndoe")
            .with_social("linkedin", "johndoe")
            .with_social("github", "johndoe"),
        Profile::new("2", "Jane Smith")
            .with_description(
                "UX Designer passionate about user-centered design with expertise in Figma and Adobe Creative Suite.",
            )
            .with_location(34.0522, -118.2437)
            .with_address("Los Angeles, CA")
            .with_email("jane.smith@example.com")
            .with_phone("+1 (555) 987-6543")
            .with_interests(["Design", "Art", "Travel", "Photography"])
            .with_social("twitter", "janesmith")
            .with_social("linkedin", "janesmith")
            .with_social("dribbble", "janesmith"),
        Profile::new("3", "Alex Johnson")
            .with_description(
                "Marketing Specialist with a focus on digital strategies and content creation for tech companies.",
            )
            .with_location(41.8781, -87.6298)
            .with_address("Chicago, IL")
            .with_email("alex.johnson@example.com")
            .with_phone("+1 (555) 456-7890")
            .with_interests(["Marketing", "Reading", "Cooking", "Running"])
            .with_social("twitter", "alexj")
            .with_social("linkedin", "alexjohnson")
            .with_social("instagram", "alexj"),
        Profile::new("4", "Maria Garcia")
            .with_description(
                "Data Scientist specializing in machine learning and predictive analytics with 3 years of industry experience.",
            )
            .with_location(29.7604, -95.3698)
            .with_address("Houston, TX")
            .with_email("maria.garcia@example.com")
            .with_phone("+1 (555) 234-5678")
            .with_interests(["Data Science", "AI", "Yoga", "Chess"])
            .with_social("twitter", "mariagarcia")
            .with_social("linkedin", "mariagarcia")
            .with_social("github", "mariagarcia"),
        Profile::new("5", "David Kim")
            .with_description(
                "Full Stack Developer with expertise in MERN stack and cloud infrastructure. Currently working on e-commerce solutions.",
            )
            .with_location(47.6062, -122.3321)
            .with_address("Seattle, WA")
            .with_email("david.kim@example.com")
            .with_phone("+1 (555) 876-5432")
            .with_interests(["Programming", "Gaming", "Hiking", "Music"])
            .with_social("twitter", "davidkim")
            .with_social("linkedin", "davidkim")
            .with_social("github", "davidkim"),
        Profile::new("6", "Sarah Johnson")
            .with_description(
                "Product Manager with a background in psychology, focused on creating intuitive user experiences.",
            )
            .with_location(37.7749, -122.4194)
            .with_address("San Francisco, CA")
            .with_email("sarah.johnson@example.com")
            .with_phone("+1 (555) 345-6789")
            .with_interests(["Product Design", "Psychology", "Cycling", "Meditation"])
            .with_social("twitter", "sarahj")
            .with_social("linkedin", "sarahjohnson")
            .with_social("medium", "sarahj"),
        Profile::new("7", "Michael Brown")
            .with_description(
                "DevOps Engineer specializing in CI/CD pipelines and infrastructure automation using Kubernetes and Terraform.",
            )
            .with_location(39.9526, -75.1652)
            .with_address("Philadelphia, PA")
            .with_email("michael.brown@example.com")
            .with_phone("+1 (555) 567-8901")
            .with_interests(["DevOps", "Cloud Computing", "Fishing", "Woodworking"])
            .with_social("twitter", "michaelb")
            .with_social("linkedin", "michaelbrown")
            .with_social("github", "michaelb"),
        Profile::new("8", "Emily Wilson")
            .with_description(
                "Content Strategist and copywriter with experience in tech and healthcare industries.",
            )
            .with_location(33.4484, -112.074)
            .with_address("Phoenix, AZ")
            .with_email("emily.wilson@example.com")
            .with_phone("+1 (555) 678-9012")
            .with_interests(["Writing", "Blogging", "Photography", "Hiking"])
            .with_social("twitter", "emilyw")
            .with_social("linkedin", "emilywilson")
            .with_social("medium", "emilyw"),
    ]
}
