//! Fixed prompt template the coach endpoint interpolates the caller's
//! profile into before forwarding the question.

use crate::metrics::Profile;

fn field<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "Not specified".to_string(), |v| v.to_string())
}

/// The FitSync coaching context. Missing profile fields render as
/// "Not specified" so the model knows not to assume them.
pub fn fitness_context(profile: &Profile) -> String {
    format!(
        "You are FitSync, a helpful fitness and nutrition coach.\n\
         \n\
         User Context:\n\
         - Age: {age}\n\
         - Weight: {weight} kg\n\
         - Height: {height} cm\n\
         - Activity Level: {activity}\n\
         - Goals: {goal}\n\
         \n\
         Please provide helpful, accurate, and safe fitness and nutrition advice. \
         Always recommend consulting with healthcare professionals for medical concerns. \
         Keep responses concise but informative.",
        age = field(profile.age),
        weight = field(profile.weight_kg),
        height = field(profile.height_cm),
        activity = field(profile.activity_level.map(|a| a.as_str())),
        goal = field(profile.goal.map(|g| g.as_str())),
    )
}

pub fn question(context: &str, message: &str) -> String {
    format!("{context}\n\nUser Question: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ActivityLevel, Gender, Goal};

    #[test]
    fn context_interpolates_profile_fields() {
        let profile = Profile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age: Some(25),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Lose),
        };
        let context = fitness_context(&profile);
        assert!(context.contains("- Age: 25"));
        assert!(context.contains("- Weight: 70 kg"));
        assert!(context.contains("- Height: 175 cm"));
        assert!(context.contains("- Activity Level: moderate"));
        assert!(context.contains("- Goals: lose"));
    }

    #[test]
    fn missing_fields_render_as_not_specified() {
        let context = fitness_context(&Profile::default());
        assert!(context.contains("- Age: Not specified"));
        assert!(context.contains("- Weight: Not specified kg"));
        assert!(context.contains("- Goals: Not specified"));
    }

    #[test]
    fn question_is_appended_after_the_context() {
        let prompt = question("CONTEXT", "Should I bulk or cut?");
        assert!(prompt.starts_with("CONTEXT\n\n"));
        assert!(prompt.ends_with("User Question: Should I bulk or cut?"));
    }
}
