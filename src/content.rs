// Static page content.
// Hero text, intro, skill groups, and social links shown by the UI.

use crate::security::is_valid_url;

/// Title and subtitle at the top of a page.
#[derive(Debug, Clone, Copy)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub const HOME_HERO: Hero = Hero {
    title: "Aakash Ambodkar",
    subtitle: "Software Engineer @ Optum | Full Stack & AI/ML | System Design",
};

pub const PROJECTS_HERO: Hero = Hero {
    title: "My Projects",
    subtitle: "Here's some of my work. I like building useful things and trying out new \
               technologies. Feel free to explore!",
};

pub const SKILLS_HERO: Hero = Hero {
    title: "Skills & Technologies",
    subtitle: "An overview of the technologies, languages, and tools I use in my \
               day-to-day development.",
};

pub const CONTACT_HERO: Hero = Hero {
    title: "Let's Connect",
    subtitle: "Whether you have a project in mind or just want to say hello, feel free to \
               reach out. I'm always happy to connect.",
};

pub const INTRO: &[&str] = &[
    "Hey there!",
    "I'm Aakash, a Software Engineer focused on Full-Stack development, AI/ML \
     engineering, and distributed systems. I enjoy turning ideas into real products, \
     improving systems, and learning whatever it takes to build better software.",
    "Most of my work revolves around backend systems and AI/ML driven applications. \
     I'm comfortable designing APIs, working with databases, and building end-to-end \
     features.",
    "Outside of coding, I stay active through fitness routines, playing soccer, and \
     exploring new hiking trails. Let's connect!",
];

/// A titled group of skill tags.
#[derive(Debug, Clone, Copy)]
pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const SKILLS: &[SkillGroup] = &[
    SkillGroup {
        title: "Programming Languages",
        items: &["Python", "JavaScript", "Java", "C++", "TypeScript"],
    },
    SkillGroup {
        title: "Frontend",
        items: &["React", "Next.js", "Tailwind CSS", "HTML/CSS", "Vue.js"],
    },
    SkillGroup {
        title: "Backend",
        items: &["Node.js", "Express", "Django", "Spring Boot", "FastAPI"],
    },
    SkillGroup {
        title: "Databases & Cloud",
        items: &["PostgreSQL", "MongoDB", "AWS", "Firebase", "Docker"],
    },
    SkillGroup {
        title: "AI/ML",
        items: &["TensorFlow", "PyTorch", "Scikit-learn", "NLP", "LLMs"],
    },
    SkillGroup {
        title: "Mobile",
        items: &["React Native", "Flutter", "Swift", "Kotlin"],
    },
    SkillGroup {
        title: "Tools & Technologies",
        items: &["Git", "GitHub", "CI/CD", "RESTful APIs", "GraphQL"],
    },
];

/// External profile link shown in the footer.
#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        label: "LinkedIn",
        url: "https://linkedin.com/in/aakashambodkar/",
    },
    SocialLink {
        label: "GitHub",
        url: "https://github.com/aakash-01-1996",
    },
    SocialLink {
        label: "LeetCode",
        url: "https://leetcode.com/u/aakash_ambodkar/",
    },
    SocialLink {
        label: "Twitter",
        url: "https://twitter.com/AakashAmbodkar7",
    },
];

/// Social links that pass URL validation.
pub fn footer_links() -> impl Iterator<Item = &'static SocialLink> {
    SOCIAL_LINKS.iter().filter(|link| is_valid_url(link.url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_social_links_are_valid() {
        assert_eq!(footer_links().count(), SOCIAL_LINKS.len());
    }

    #[test]
    fn test_skill_groups_are_populated() {
        assert!(SKILLS.iter().all(|group| !group.items.is_empty()));
    }
}
