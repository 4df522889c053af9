//! Fixed prompt pair sent to the generative model, and the sampling
//! parameters that go with it.

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const MAX_TOKENS: u32 = 650;
pub const TEMPERATURE: f32 = 0.8;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant capable of creating clear and concise PowerPoint slide outlines used by teachers during their lessons based on a given lesson plan. You follow template instructions carefully";

/// Topic-interpolated user prompt describing the outline grammar the parser
/// expects: title line, optional `Heading:` line, sub-points, optional
/// `Image:`/`Icon:` lines, blank-line separated blocks, one theme token.
pub fn user_prompt(lesson_topic: &str) -> String {
    format!(
        "Create PowerPoint slides for a lesson plan. The slides should be visually engaging, include concise headings and bullet points, and have relevant images or icons when necessary. Limit each slide to a maximum of 4 sub-points and a single image or icon when relevant. Divide the same heading into multiple slides if required to make the points more clear.\
\n\nFor the first slide, include the lesson title and relevant sub-points. Also, include a closing slide with takeaways from the lesson. Choose a PowerPoint theme from these options: dark, light, corporate, playful, modern, and vibrant, depending on the lesson's context.\
\n\nLesson Plan:\n{lesson_topic}\
\n\nFor each slide, provide this information:\n\n\
#. Slide (slide_title):\n\
Heading: concise_heading\n\
Sub-point 1:\n\
Sub-point 2:\n\
...\n\
If an image is relevant, include: 'Image: short_description_of_image'\n\
If an icon is relevant, include: 'Icon: font_awesome_icon_code'\n\
When creating the slides, remember to use clear and concise language, write the slides for the students to understand, and use appropriate images or icons, and choose a suitable theme for the PowerPoint presentation."
    )
}
