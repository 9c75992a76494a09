use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResumeTemplate {
    pub name: &'static str,
    pub body: &'static str,
}

pub static TEMPLATES: [ResumeTemplate; 3] = [
    ResumeTemplate {
        name: "Classic",
        body: "[Classic Resume Template]
Name: John Doe
Email: johndoe@email.com
Phone: 123-456-7890

Objective:
Recent graduate seeking entry-level position in Software Development.

Education:
B.Tech in Computer Science - XYZ University (2024)

Skills:
- Python, Java, SQL
- Problem Solving
- Communication",
    },
    ResumeTemplate {
        name: "Modern",
        body: "[Modern Resume Template]
John Doe
📧 johndoe@email.com | 📞 123-456-7890

💡 Profile:
Motivated fresher with strong programming and analytical skills.

🎓 Education:
B.Tech in Computer Science - XYZ University (2024)

⚙️ Skills:
Python | Java | SQL | Team Collaboration

📂 Projects:
- AI Chatbot
- E-commerce Website",
    },
    ResumeTemplate {
        name: "Creative",
        body: "[Creative Resume Template]
🌟 John Doe 🌟
Software Engineer | Problem Solver

📧 johndoe@email.com | 📞 123-456-7890

🎯 Career Goal:
To innovate and build impactful technology solutions.

🎓 Education:
XYZ University - B.Tech in Computer Science (2024)

🛠 Skills:
⚡ Python ⚡ Java ⚡ SQL ⚡ Creativity

📂 Projects:
1. Resume Analyzer AI
2. Portfolio Website",
    },
];

/// Case-sensitive lookup by template name.
pub fn find(name: &str) -> Option<&'static ResumeTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}
