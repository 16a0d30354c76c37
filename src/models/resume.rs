use serde::{Deserialize, Serialize};

/// Client-generated identifier of a list entry. Stable across edits and used
/// as the mutation target; never handed out twice within a session.
pub type EntryId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: EntryId,
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// Newline-delimited bullet lines, each optionally prefixed with `- `.
    pub description: String,
}

impl WorkExperience {
    pub fn empty(id: EntryId) -> Self {
        Self {
            id,
            job_title: String::new(),
            company: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub degree: String,
    pub school: String,
    pub grad_date: String,
}

impl Education {
    pub fn empty(id: EntryId) -> Self {
        Self {
            id,
            degree: String::new(),
            school: String::new(),
            grad_date: String::new(),
        }
    }
}

/// The canonical resume value. Serialized in the same camelCase layout that
/// lands in storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRecord {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub linked_in: String,
    pub github: String,
    pub website: String,
    pub professional_summary: String,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
}

impl ResumeRecord {
    /// The sample resume a fresh session starts from.
    pub fn seed() -> Self {
        Self {
            full_name: "Olivia Chen".to_string(),
            email: "olivia.chen@email.com".to_string(),
            phone_number: "123-456-7890".to_string(),
            linked_in: "linkedin.com/in/oliviachen".to_string(),
            github: "github.com/oliviachen".to_string(),
            website: "oliviachen.dev".to_string(),
            professional_summary: "Seasoned Full-Stack Developer with over 8 years of experience in designing, developing, and deploying scalable web applications. Proficient in JavaScript, React, Node.js, and cloud technologies. Passionate about creating intuitive user experiences and solving complex problems. I led a team to improve application performance by 30%.".to_string(),
            skills: [
                "React",
                "TypeScript",
                "Node.js",
                "Express",
                "PostgreSQL",
                "AWS",
                "Docker",
                "CI/CD",
                "Agile Methodologies",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            work_experience: vec![
                WorkExperience {
                    id: "work1".to_string(),
                    job_title: "Senior Software Engineer".to_string(),
                    company: "Innovate Solutions Inc.".to_string(),
                    start_date: "Jan 2020".to_string(),
                    end_date: "Present".to_string(),
                    description: "- Led the development of a new customer-facing analytics dashboard using React and D3.js.\n- Mentored junior engineers and conducted code reviews to maintain code quality.\n- Worked on a project to migrate our main application from a monolith to microservices.\n- Improved API response times by optimizing database queries.".to_string(),
                },
                WorkExperience {
                    id: "work2".to_string(),
                    job_title: "Software Engineer".to_string(),
                    company: "Tech Forward LLC".to_string(),
                    start_date: "Jun 2016".to_string(),
                    end_date: "Dec 2019".to_string(),
                    description: "- Developed and maintained features for a large-scale e-commerce platform.\n- Wrote unit and integration tests to ensure application reliability.\n- Collaborated with product managers and designers to translate requirements into technical solutions.".to_string(),
                },
            ],
            education: vec![Education {
                id: "edu1".to_string(),
                degree: "B.S. in Computer Science".to_string(),
                school: "University of Technology".to_string(),
                grad_date: "May 2016".to_string(),
            }],
        }
    }

    /// Most recent job title, used as a headline by some templates.
    pub fn headline(&self) -> Option<&str> {
        self.work_experience
            .first()
            .map(|exp| exp.job_title.as_str())
            .filter(|title| !title.is_empty())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.work_experience.iter().any(|exp| exp.id == id)
            || self.education.iter().any(|edu| edu.id == id)
    }
}

/// Splits a description into render-ready bullet lines: blank lines are
/// skipped and a single leading `- ` marker is removed.
pub fn description_lines(description: &str) -> impl Iterator<Item = &str> {
    description
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.strip_prefix("- ").unwrap_or(line))
}
