/// Technologies offered on the technologies step, grouped by category in display order.
pub const TECHNOLOGIES: &[(&str, &str)] = &[
    ("Frontend", "React"),
    ("Frontend", "Vue.js"),
    ("Frontend", "Angular"),
    ("Frontend", "Next.js"),
    ("Frontend", "Svelte"),
    ("Frontend", "TypeScript"),
    ("Frontend", "JavaScript"),
    ("Backend", "Node.js"),
    ("Backend", "Python"),
    ("Backend", "Java"),
    ("Backend", "Go"),
    ("Backend", "PHP"),
    ("Backend", "C#"),
    ("Backend", "Ruby"),
    ("Backend", "Rust"),
    ("Mobile", "React Native"),
    ("Mobile", "Flutter"),
    ("Mobile", "Swift"),
    ("Mobile", "Kotlin"),
    ("Database", "PostgreSQL"),
    ("Database", "MySQL"),
    ("Database", "MongoDB"),
    ("Database", "Redis"),
    ("Database", "SQLite"),
    ("Cloud & DevOps", "AWS"),
    ("Cloud & DevOps", "Google Cloud"),
    ("Cloud & DevOps", "Azure"),
    ("Cloud & DevOps", "Docker"),
    ("Cloud & DevOps", "Kubernetes"),
    ("Cloud & DevOps", "CI/CD"),
    ("Other", "GraphQL"),
    ("Other", "REST APIs"),
    ("Other", "Git"),
    ("Other", "Machine Learning"),
    ("Other", "Blockchain"),
];

/// Categories in first-appearance order, each with its technologies.
pub fn grouped() -> Vec<(&'static str, Vec<&'static str>)> {
    let mut groups: Vec<(&'static str, Vec<&'static str>)> = Vec::new();
    for &(category, name) in TECHNOLOGIES {
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, names)) => names.push(name),
            None => groups.push((category, vec![name])),
        }
    }
    groups
}
