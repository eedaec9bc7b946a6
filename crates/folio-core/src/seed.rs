//! Statically authored profile and fallback projects.
//!
//! The seed projects stand in for the live list whenever aggregation fails or
//! comes back empty.

use crate::models::{Profile, Project, Skill, NO_LIVE_DEMO};

pub fn profile() -> Profile {
    Profile {
        name: "Olorunishola Farouk".to_string(),
        profession: "Full Stack Development Student".to_string(),
        institution: "Aptech Learning, Lagos".to_string(),
        location: "Lagos, Nigeria".to_string(),
        email: "faroukayomide33@gmail.com".to_string(),
        phone: "07030195046".to_string(),
        bio: "I am a dedicated student at Aptech Learning Lagos, Nigeria, specializing in modern \
              web technologies and software engineering. I am passionate about building functional \
              and beautiful digital solutions, leveraging a strong foundation in both frontend and \
              backend development. You can reach me directly via email or at my contact number: \
              07030195046."
            .to_string(),
        skills: vec![
            skill("Frontend", &["HTML", "CSS", "JavaScript", "TypeScript", "React.js"]),
            skill("Backend & Core", &["Java", "SQL", "Node.js"]),
            skill("Data & Tools", &["XML", "JSON", "Git", "GitHub"]),
        ],
        accounts: vec!["frukose".to_string(), "farouk908".to_string()],
    }
}

fn skill(category: &str, items: &[&str]) -> Skill {
    Skill {
        category: category.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    long_description: &'static str,
    problem_solved: &'static str,
    tech_stack: &'static [&'static str],
    image_url: &'static str,
    repo_url: &'static str,
}

const SEEDS: [Seed; 4] = [
    Seed {
        id: "1",
        name: "Java Library Management System",
        description: "A comprehensive backend system for managing library operations, built with Java and MySQL.",
        long_description: "This project implements complex library logic including book tracking, member \
            registrations, and fine calculations. It utilizes JDBC for database connectivity and demonstrates \
            solid OOP principles learned at Aptech.",
        problem_solved: "Replaced manual record-keeping with an automated system that prevents book loss and \
            tracks borrowing history with high accuracy.",
        tech_stack: &["Java", "MySQL", "JDBC", "OOP"],
        image_url: "https://images.unsplash.com/photo-1507842217343-583bb7270b66?auto=format&fit=crop&q=80&w=1200",
        repo_url: "https://github.com/frukose/Java-Library-Management",
    },
    Seed {
        id: "2",
        name: "Student Management System",
        description: "A desktop-based CRUD application for educational institutions to manage student data.",
        long_description: "Developed as a core project at Aptech, this system allows for seamless entry and \
            retrieval of student information. It features a custom Java Swing UI and robust data validation logic.",
        problem_solved: "Streamlined the administrative workflow for student registration, reducing the time \
            spent on data entry by 60%.",
        tech_stack: &["Java", "Swing", "SQL"],
        image_url: "https://images.unsplash.com/photo-1523240795612-9a054b0db644?auto=format&fit=crop&q=80&w=1200",
        repo_url: "https://github.com/frukose/Student-Management-System",
    },
    Seed {
        id: "3",
        name: "React Portfolio AI Twin",
        description: "An advanced portfolio featuring an AI-powered Digital Twin using the Gemini API.",
        long_description: "This project showcases my ability to integrate LLMs into modern web applications. \
            Built with React and TypeScript, it allows visitors to converse with an AI trained on my \
            professional background.",
        problem_solved: "Eliminates the 'static' nature of traditional portfolios by providing real-time answers \
            to recruiter questions about my code and experience.",
        tech_stack: &["React.js", "TypeScript", "Tailwind CSS", "Gemini API"],
        image_url: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&q=80&w=1200",
        repo_url: "https://github.com/frukose/portfolio-ai-twin",
    },
    Seed {
        id: "4",
        name: "Enterprise Java Solutions",
        description: "A collection of advanced Java modules focused on backend scalability and design patterns.",
        long_description: "Sourced from my second GitHub account (farouk908), this repository contains \
            implementations of various design patterns and data structure optimizations for enterprise-grade \
            applications.",
        problem_solved: "Demonstrates advanced software engineering concepts like concurrency management and \
            performance profiling in Java.",
        tech_stack: &["Java", "Design Patterns", "Data Structures"],
        image_url: "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?auto=format&fit=crop&q=80&w=1200",
        repo_url: "https://github.com/farouk908",
    },
];

/// Fresh copy of the fallback project list
pub fn seed_projects() -> Vec<Project> {
    SEEDS
        .iter()
        .map(|seed| Project {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            tech_stack: seed.tech_stack.iter().map(|t| t.to_string()).collect(),
            image_url: seed.image_url.to_string(),
            repo_url: seed.repo_url.to_string(),
            live_demo_url: NO_LIVE_DEMO.to_string(),
            long_description: seed.long_description.to_string(),
            problem_solved: seed.problem_solved.to_string(),
        })
        .collect()
}
