use rand::seq::SliceRandom;
use rand::Rng;

use crate::refraction::TaskKind;

/// Instruction templates. `{n_glass}` is replaced by the glass refractive
/// index with two decimals.
const DEFAULT_PROMPTS: &[&str] = &[
    "Given the refractive index of glass = {n_glass}, predict the refraction of light through the glass. The refracted ray should extend to the edge of the image.",
    "Given the glass refractive index = {n_glass}, predict how light refracts when passing through the glass. Extend the refracted ray to the image edge.",
    "Given the refractive index of glass = {n_glass}, predict the light refraction through the glass surface. The refracted ray must extend all the way to the edge of the image.",
];

/// Evaluation guidance for graders of a predicted refraction.
const DEFAULT_RUBRICS: &[&str] = &[
    "Check if the solution correctly predicts the light refraction angle based on Snell's law. Verify that the refracted ray angle matches the calculated value using the given glass refractive index. Ensure the animation shows smooth light propagation from air into glass, with the ray bending at the glass surface according to physical laws. The final visualization should clearly show both the incident and refracted rays with correct angles.",
    "Verify that the solution accurately calculates and visualizes the refraction angle using the provided glass refractive index. Check that the light ray bends correctly at the glass-air interface, with the bending direction and magnitude consistent with Snell's law. The animation should smoothly show light entering the glass and refracting, and the final state should clearly demonstrate the refracted ray propagating in the glass at the correct angle.",
    "Confirm the solution shows the correct refraction angle calculation and visualization. Check that the refracted ray angle is accurate based on the given glass refractive index and incident angle. The animation should demonstrate smooth light propagation and refraction, and the final visualization should clearly show the light ray following physical laws as it enters and propagates through the glass.",
];

/// Every prompt template for `kind`.
pub fn all_prompts(kind: TaskKind) -> &'static [&'static str] {
    match kind {
        TaskKind::Default => DEFAULT_PROMPTS,
    }
}

/// Every rubric for `kind`.
pub fn all_rubrics(kind: TaskKind) -> &'static [&'static str] {
    match kind {
        TaskKind::Default => DEFAULT_RUBRICS,
    }
}

/// Fills a prompt template with the glass index.
pub fn fill_prompt(template: &str, n_glass: f64) -> String {
    template.replace("{n_glass}", &format!("{:.2}", n_glass))
}

/// Picks a random prompt for `kind` with the glass index filled in.
pub fn get_prompt<R: Rng + ?Sized>(kind: TaskKind, n_glass: f64, rng: &mut R)
    -> String {
    let templates = all_prompts(kind);
    let template = templates.choose(rng).unwrap_or(&templates[0]);

    fill_prompt(template, n_glass)
}

/// Picks a random rubric for `kind`.
pub fn get_rubric<R: Rng + ?Sized>(kind: TaskKind, rng: &mut R) -> String {
    let rubrics = all_rubrics(kind);
    rubrics.choose(rng).unwrap_or(&rubrics[0]).to_string()
}

#[cfg(test)]
use rand::{ rngs::StdRng, SeedableRng };

#[test]
fn three_templates_each() {
    assert_eq!(all_prompts(TaskKind::Default).len(), 3);
    assert_eq!(all_rubrics(TaskKind::Default).len(), 3);
}

#[test]
fn prompt_formats_index_to_two_decimals() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..20 {
        let prompt = get_prompt(TaskKind::Default, 1.4567, &mut rng);
        assert!(prompt.contains("= 1.46,"), "{}", prompt);
        assert!(!prompt.contains("{n_glass}"));
    }

    assert!(fill_prompt(DEFAULT_PROMPTS[0], 1.5).contains("glass = 1.50,"));
}

#[test]
fn every_template_is_reachable() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut seen = [false; 3];

    for _ in 0..200 {
        let prompt = get_prompt(TaskKind::Default, 1.5, &mut rng);
        for (i, template) in DEFAULT_PROMPTS.iter().enumerate() {
            if prompt == fill_prompt(template, 1.5) {
                seen[i] = true;
            }
        }
    }

    assert!(seen.iter().all(|s| *s));
}

#[test]
fn rubric_is_one_of_the_set() {
    let mut rng = StdRng::seed_from_u64(9);
    let rubric = get_rubric(TaskKind::Default, &mut rng);

    assert!(DEFAULT_RUBRICS.contains(&rubric.as_str()));
}
