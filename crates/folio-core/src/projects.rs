//! Portfolio project details.
//!
//! A static table keyed by project id, and the view-model built from it.

use std::fmt;

use serde::Serialize;

/// One highlighted feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Short heading.
    pub title: &'static str,
    /// One or two sentences.
    pub description: &'static str,
}

/// Team size and the author's part in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Team {
    /// Number of members.
    pub size: u32,
    /// The author's role.
    pub role: &'static str,
    /// Main responsibilities.
    pub focus: &'static [&'static str],
}

/// External link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Link text.
    pub text: &'static str,
    /// Target.
    pub url: &'static str,
}

struct Project {
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    overview: &'static str,
    contributions: Option<&'static str>,
    features: &'static [Feature],
    tech_stack: &'static [&'static str],
    team: Option<Team>,
    results: &'static [(&'static str, &'static str)],
    links: &'static [Link],
}

/// A labelled result figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    /// Display label, e.g. `Detection Accuracy`.
    pub label: String,
    /// Value as shown.
    pub value: &'static str,
}

/// Everything needed to render a project's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    /// Table key.
    pub id: &'static str,
    /// Title.
    pub title: &'static str,
    /// Subtitle.
    pub subtitle: &'static str,
    /// Overview paragraph.
    pub overview: &'static str,
    /// The author's contributions, when stated.
    pub contributions: Option<&'static str>,
    /// Key features.
    pub features: &'static [Feature],
    /// Technologies used.
    pub tech_stack: &'static [&'static str],
    /// Team details, when stated.
    pub team: Option<Team>,
    /// Result figures in table order.
    pub results: Vec<ResultItem>,
    /// External links; may be empty.
    pub links: &'static [Link],
}

/// Builds the view for `id`, or `None` for an unknown id.
#[must_use]
pub fn project_view(id: &str) -> Option<ProjectView> {
    let project = PROJECTS.iter().find(|p| p.id == id)?;

    Some(ProjectView {
        id: project.id,
        title: project.title,
        subtitle: project.subtitle,
        overview: project.overview,
        contributions: project.contributions,
        features: project.features,
        tech_stack: project.tech_stack,
        team: project.team,
        results: project
            .results
            .iter()
            .map(|&(key, value)| ResultItem {
                label: result_label(key),
                value,
            })
            .collect(),
        links: project.links,
    })
}

/// Known project ids in display order.
#[must_use]
pub fn project_ids() -> Vec<&'static str> {
    PROJECTS.iter().map(|p| p.id).collect()
}

/// Turns a camel-case key into a title-case label.
fn result_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}

impl fmt::Display for ProjectView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f)?;
        writeln!(f, "Overview")?;
        writeln!(f, "  {}", self.overview)?;

        if let Some(contributions) = self.contributions {
            writeln!(f)?;
            writeln!(f, "My Contributions")?;
            writeln!(f, "  {contributions}")?;
        }

        writeln!(f)?;
        writeln!(f, "Key Features")?;
        for feature in self.features {
            writeln!(f, "  - {}: {}", feature.title, feature.description)?;
        }

        if let Some(team) = &self.team {
            writeln!(f)?;
            writeln!(f, "Team & Role")?;
            writeln!(f, "  Team Size: {} members", team.size)?;
            writeln!(f, "  My Role: {}", team.role)?;
            for item in team.focus {
                writeln!(f, "  * {item}")?;
            }
        }

        if !self.results.is_empty() {
            writeln!(f)?;
            writeln!(f, "Results")?;
            for item in &self.results {
                writeln!(f, "  {}: {}", item.label, item.value)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Tech Stack")?;
        writeln!(f, "  {}", self.tech_stack.join(", "))?;

        for link in self.links {
            writeln!(f)?;
            write!(f, "{}: {}", link.text, link.url)?;
        }
        Ok(())
    }
}

const PROJECTS: &[Project] = &[
    Project {
        id: "yololabel",
        title: "YOLOLabel AI",
        subtitle: "AI-Powered Bounding Box Labeling Tool with Active Learning & MLOps",
        overview: "A complete active learning loop for object detection: Label images → Train model → Auto-predict → Review → Repeat. Features a built-in MLOps dashboard for tracking training history, model versions, and experiments. Built with FastAPI backend and Vanilla JS frontend.",
        contributions: Some(
            "I independently designed and built the entire tool from scratch — backend architecture, AI pipeline, database schema, frontend canvas editor, and MLOps dashboard. The system implements a full active learning cycle with uncertainty-based smart queuing.",
        ),
        features: &[
            Feature {
                title: "Canvas Labeling Editor",
                description: "Draw, resize, and move bounding boxes with keyboard shortcuts. Multi-class support with unlimited classes, auto-save, and YOLO-format import/export.",
            },
            Feature {
                title: "Active Learning (v2.0)",
                description: "Smart queue ranking images by model uncertainty (multi-factor scoring). Prediction caching in SQLite, cycle tracking, and accept/reject review workflow.",
            },
            Feature {
                title: "MLOps Dashboard (v2.0)",
                description: "Training history with per-epoch metrics, model registry with version stages (none → staging → production → archived), auto-promote best models, and side-by-side run comparison.",
            },
            Feature {
                title: "Playground (v2.0)",
                description: "Drag & drop images/videos to live test any registry model. Displays inference latency, active detections, threshold tuning, and audit logging.",
            },
        ],
        tech_stack: &[
            "FastAPI",
            "YOLO11",
            "PyTorch",
            "SQLite",
            "Vanilla JS",
            "HTML5 Canvas",
            "Python",
            "Ultralytics",
        ],
        team: Some(Team {
            size: 1,
            role: "Full-Stack AI Engineer",
            focus: &[
                "Designed complete system architecture",
                "Built FastAPI backend with 7-table SQLite schema",
                "Implemented active learning uncertainty scoring",
                "Developed canvas-based annotation editor",
                "Created MLOps dashboard with model registry",
            ],
        }),
        results: &[
            ("architecture", "FastAPI + Vanilla JS SPA"),
            ("database", "SQLite (7 tables, WAL mode)"),
            ("features", "Labeling + Active Learning + MLOps + Playground"),
            ("models", "YOLO11/YOLO26 support"),
            ("status", "Open Source on GitHub"),
        ],
        links: &[Link {
            text: "GitHub Repository",
            url: "https://github.com/hdtinh57/YOLOLabel_AI",
        }],
    },
    Project {
        id: "navigation",
        title: "AI-Powered Navigation for the Visually Impaired",
        subtitle: "Lightweight Real-time Object Detection & Voice-Guided Assistance",
        overview: "A graduation capstone project developed by a team of four, designed to assist visually impaired users with real-time environmental understanding. The system integrates lightweight object detection, depth estimation, and natural language feedback to enable safe and independent navigation.",
        contributions: Some(
            "As the primary AI developer, I led the design and optimization of the object detection and depth estimation modules. I proposed a lightweight alternative to traditional 3D object detection, achieving faster inference without sacrificing spatial precision.",
        ),
        features: &[
            Feature {
                title: "Lightweight Object Detection",
                description: "Optimized YOLO11 model achieving ~90% detection accuracy while maintaining real-time performance on edge devices.",
            },
            Feature {
                title: "Depth Estimation",
                description: "Integrated Depth Anything V2 for precise distance measurement with 94.7% accuracy within ±30 cm.",
            },
            Feature {
                title: "Voice-Guided Feedback",
                description: "Utilized GPT-4o for generating natural spoken navigation cues with bidirectional interaction.",
            },
            Feature {
                title: "Accessibility-Centered Design",
                description: "Intuitive voice feedback and low-latency processing for real-world deployment.",
            },
        ],
        tech_stack: &[
            "YOLO11",
            "Depth Anything V2",
            "wav2vec-base-vietnamese-250h",
            "ElevenLabs",
            "GPT-4o",
            "Python",
            "OpenCV",
            "PyTorch",
        ],
        team: Some(Team {
            size: 4,
            role: "AI Engineer / Research Lead",
            focus: &[
                "Proposed and designed core AI architecture",
                "Led model benchmarking and lightweight optimization",
                "Developed and trained detection and depth modules",
                "Built and tested full integration pipeline",
            ],
        }),
        results: &[
            ("detectionAccuracy", "~90%"),
            ("depthAccuracy", "94.7% within ±30 cm"),
            ("latency", "Real-time (30 FPS)"),
            ("deployment", "Web application"),
        ],
        links: &[],
    },
    Project {
        id: "tempromot",
        title: "LLM-Guided Multi-Object Tracking (TempRMOT)",
        subtitle: "Research Publication — MLHMI 2025",
        overview: "A collaborative research project integrating Temporally Enhanced Referring Multi-Object Tracking with Large Language Models to improve retail scene understanding and customer behavior analysis.",
        contributions: Some(
            "As the research engineer of a 3-member team, I focused on exploring TempRMOT architecture, building the labeling pipeline and annotation tools, and supporting model training and evaluation.",
        ),
        features: &[
            Feature {
                title: "Hybrid Architecture",
                description: "Integrated TempRMOT with LLMs for improved multi-object tracking and temporal reasoning.",
            },
            Feature {
                title: "Retail Analytics Focus",
                description: "Designed for retail environments to analyze customer behavior through video sequences.",
            },
            Feature {
                title: "Performance Results",
                description: "81.8% Exact Match, 84.5% Semantic Similarity on custom retail dataset, 90.07% on Refer-KITTI-V2.",
            },
            Feature {
                title: "Academic Contribution",
                description: "Published at MLHMI 2025 International Conference.",
            },
        ],
        tech_stack: &[
            "TempRMOT",
            "Large Language Models",
            "PyTorch",
            "OpenCV",
            "Python",
            "Computer Vision",
        ],
        team: Some(Team {
            size: 3,
            role: "Research Engineer",
            focus: &[
                "Researched TempRMOT methodologies",
                "Designed labeling tools and data pipeline",
                "Supported dataset collection and annotation",
                "Assisted in training and evaluating TempRMOT",
            ],
        }),
        results: &[
            ("exactMatch", "81.8%"),
            ("semanticSimilarity", "84.5%"),
            ("referKittiV2", "90.07%"),
            (
                "publication",
                "MLHMI 2025 — DOI: 10.1109/MLHMI66056.2025.00018",
            ),
        ],
        links: &[Link {
            text: "View Publication",
            url: "https://doi.org/10.1109/MLHMI66056.2025.00018",
        }],
    },
    Project {
        id: "gptjson",
        title: "GPT-JSON: Intelligent Q&A over Structured Data",
        subtitle: "LLM-powered WebApp for Conversational JSON Querying",
        overview: "A personal utility project that enables users to interact with JSON files through natural language queries using LLMs for parsing, retrieval, and contextual answers.",
        contributions: Some(
            "I independently designed and built the entire pipeline — from frontend to model integration using LangChain, ChromaDB, and Gradio.",
        ),
        features: &[
            Feature {
                title: "Conversational Data Access",
                description: "Query complex JSON data in natural language with grounded responses.",
            },
            Feature {
                title: "Vector-based Retrieval",
                description: "ChromaDB for efficient semantic search and context retrieval.",
            },
            Feature {
                title: "LLM Integration",
                description: "OpenAI GPT models via LangChain for context-aware JSON reasoning.",
            },
            Feature {
                title: "Lightweight WebApp",
                description: "Built with Gradio for fast deployment and browser-based interaction.",
            },
        ],
        tech_stack: &["OpenAI API", "LangChain", "ChromaDB", "Gradio", "Python"],
        team: Some(Team {
            size: 1,
            role: "AI Engineer / Full-stack Developer",
            focus: &[
                "Designed system architecture and prompt pipeline",
                "Implemented semantic retrieval using ChromaDB",
                "Developed Gradio-based interactive interface",
                "Integrated GPT model for JSON reasoning",
            ],
        }),
        results: &[
            ("usability", "Natural-language access to structured JSON data"),
            ("latency", "Real-time responses (<2s)"),
            ("deployment", "Local + hosted prototype via Gradio"),
        ],
        links: &[Link {
            text: "View Colab Notebook",
            url: "https://colab.research.google.com/drive/1sXu8hfet21bB9ctB1UD9iQgfLZWKFUAk#scrollTo=msgQ_YLwcdUm",
        }],
    },
    Project {
        id: "newsagent",
        title: "Automated News Aggregation & Content Agent",
        subtitle: "AI-Powered Multi-LLM Content Pipeline — Internal Product at Future Space",
        overview: "An end-to-end automated news aggregation and content generation system. Crawls news from multiple sources, deduplicates content, then uses Multi-LLM orchestration to filter, tag, and rewrite articles for SEO optimization.",
        contributions: Some(
            "I independently architected and implemented the entire pipeline from scratch including the ETL workflow in n8n, Supabase schema, and integrating OpenAI, Gemini, and Jina AI.",
        ),
        features: &[
            Feature {
                title: "Multi-Source News Crawling",
                description: "Automated crawlers using n8n for 20+ news sources with smart scheduling and rate limiting.",
            },
            Feature {
                title: "Intelligent Deduplication",
                description: "Semantic similarity and hash-based matching for duplicate detection.",
            },
            Feature {
                title: "Multi-LLM Orchestration",
                description: "GPT-4o-mini for classification/tagging, Google Gemini for SEO-optimized rewriting.",
            },
            Feature {
                title: "Unstructured Content Parsing",
                description: "Jina AI Reader API for clean extraction from messy web pages.",
            },
            Feature {
                title: "Automated Publishing",
                description: "CMS API integration with scheduled auto-publishing and human review checkpoints.",
            },
        ],
        tech_stack: &[
            "n8n",
            "Supabase (PostgreSQL)",
            "OpenAI API",
            "Google Gemini API",
            "Jina AI Reader",
            "JavaScript",
            "Webhook APIs",
        ],
        team: Some(Team {
            size: 1,
            role: "AI Engineer / System Architect",
            focus: &[
                "Designed complete system architecture",
                "Built n8n automation workflows",
                "Developed Multi-LLM orchestration",
                "Created database schema and API integrations",
                "Reduced editorial workload by ~80%",
            ],
        }),
        results: &[
            ("sourcesIntegrated", "20+ news sources"),
            ("dailyArticles", "150-200 articles/day"),
            ("workloadReduction", "~80% reduction"),
            ("contentQuality", "Consistent SEO-optimized output"),
            ("uptime", "99%+ reliability"),
        ],
        links: &[],
    },
];
