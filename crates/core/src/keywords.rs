//! Static keyword data for the topic gate, one list per persona.
//!
//! Entries are lowercase substrings. Short entries match inside longer
//! words, so avoid anything that is a common fragment of everyday English.

pub(crate) const HEALTH_KW: &[&str] = &[
    // symptoms
    "symptom",
    "pain",
    "ache",
    "headache",
    "migraine",
    "fever",
    "temperature",
    "chills",
    "cough",
    "cold",
    "flu",
    "sore throat",
    "runny nose",
    "sneez",
    "congestion",
    "nausea",
    "vomit",
    "diarrhea",
    "diarrhoea",
    "constipation",
    "dizz",
    "faint",
    "fatigue",
    "tired",
    "exhaust",
    "weakness",
    "rash",
    "itch",
    "swelling",
    "swollen",
    "bleed",
    "bruise",
    "cramp",
    "numb",
    "tingling",
    "breathless",
    "shortness of breath",
    "wheez",
    "palpitation",
    "chest pain",
    "insomnia",
    "sleep",
    "stress",
    "anxiety",
    "depress",
    "mood",
    "appetite",
    "weight loss",
    "weight gain",
    "dehydrat",
    "sprain",
    "fracture",
    "injury",
    "injured",
    "burn",
    "wound",
    "infection",
    "inflam",
    "allerg",
    "asthma",
    // conditions
    "diabetes",
    "blood sugar",
    "blood pressure",
    "hypertension",
    "cholesterol",
    "heart",
    "stroke",
    "cancer",
    "tumor",
    "arthritis",
    "thyroid",
    "anemia",
    "kidney",
    "liver",
    "lung",
    "stomach",
    "acidity",
    "gastric",
    "ulcer",
    "virus",
    "viral",
    "bacteria",
    "covid",
    "malaria",
    "dengue",
    "typhoid",
    "jaundice",
    "pneumonia",
    "bronchitis",
    "sinus",
    "eczema",
    "acne",
    "pimple",
    "period",
    "menstrua",
    "pregnan",
    // body parts
    "head",
    "throat",
    "chest",
    "back pain",
    "neck",
    "shoulder",
    "knee",
    "joint",
    "muscle",
    "bone",
    "skin",
    "eye",
    "ear",
    "tooth",
    "teeth",
    "gum",
    "belly",
    "abdomen",
    // care
    "health",
    "medical",
    "medicine",
    "medication",
    "tablet",
    "pill",
    "dose",
    "dosage",
    "antibiotic",
    "paracetamol",
    "ibuprofen",
    "vaccine",
    "vaccination",
    "doctor",
    "physician",
    "hospital",
    "clinic",
    "nurse",
    "diagnos",
    "treatment",
    "therapy",
    "remedy",
    "cure",
    "recover",
    "prescription",
    "surgery",
    "checkup",
    "check-up",
    "blood test",
    "x-ray",
    "diet",
    "nutrition",
    "vitamin",
    "hydration",
    "exercise",
    "workout",
    "wellness",
    "fitness",
    "sick",
    "ill",
    "unwell",
    "hurt",
    "disease",
    // Telugu
    "తలనొప్పి",
    "జ్వరం",
    "దగ్గు",
    "నొప్పి",
    "జలుబు",
    "వాంతులు",
    "ఆరోగ్యం",
    "మందు",
];

pub(crate) const STUDY_KW: &[&str] = &[
    "study",
    "studies",
    "learn",
    "revise",
    "revision",
    "exam",
    "test",
    "quiz",
    "homework",
    "assignment",
    "project report",
    "essay",
    "thesis",
    "dissertation",
    "research",
    "lecture",
    "class",
    "course",
    "syllabus",
    "curriculum",
    "subject",
    "chapter",
    "lesson",
    "textbook",
    "notes",
    "school",
    "college",
    "university",
    "semester",
    "grade",
    "marks",
    "score",
    "teacher",
    "tutor",
    "professor",
    "student",
    "explain",
    "understand",
    "concept",
    "definition",
    "define",
    "formula",
    "theorem",
    "proof",
    "equation",
    "solve",
    "problem set",
    "practice question",
    "math",
    "algebra",
    "geometry",
    "calculus",
    "trigonometry",
    "statistics",
    "probability",
    "physics",
    "chemistry",
    "biology",
    "science",
    "history",
    "geography",
    "economics",
    "civics",
    "literature",
    "grammar",
    "vocabulary",
    "language",
    "english",
    "programming",
    "coding",
    "algorithm",
    "computer science",
    "photosynthesis",
    "molecule",
    "atom",
    "cell",
    "evolution",
    "newton",
    "periodic table",
    "memorize",
    "memorise",
    "flashcard",
    "timetable",
    "schedule for",
    "focus",
    "concentrat",
    "procrastinat",
    "motivation",
    "pomodoro",
    "mnemonic",
    "summar",
    "jee",
    "neet",
    "sat",
    "gre",
    "gmat",
    "ielts",
    "toefl",
    "olympiad",
    "scholarship",
    "admission",
];

pub(crate) const BUSINESS_KW: &[&str] = &[
    "business",
    "startup",
    "start-up",
    "company",
    "enterprise",
    "entrepreneur",
    "founder",
    "venture",
    "small business",
    "side hustle",
    "market",
    "customer",
    "client",
    "product",
    "service",
    "sales",
    "sell",
    "selling",
    "revenue",
    "profit",
    "margin",
    "loss",
    "cost",
    "price",
    "pricing",
    "budget",
    "cash flow",
    "finance",
    "financial",
    "accounting",
    "invoice",
    "tax",
    "gst",
    "loan",
    "invest",
    "funding",
    "fundraising",
    "valuation",
    "equity",
    "shareholder",
    "stock",
    "share",
    "roi",
    "kpi",
    "growth",
    "scale",
    "strategy",
    "plan",
    "competitor",
    "competition",
    "brand",
    "branding",
    "advertis",
    "campaign",
    "seo",
    "ecommerce",
    "e-commerce",
    "online store",
    "shop",
    "retail",
    "wholesale",
    "supplier",
    "supply chain",
    "inventory",
    "logistics",
    "franchise",
    "partnership",
    "contract",
    "negotiat",
    "pitch",
    "investor",
    "b2b",
    "b2c",
    "saas",
    "subscription",
    "lead",
    "conversion",
    "funnel",
    "churn",
    "retention",
    "hiring",
    "hire",
    "employee",
    "staff",
    "payroll",
    "management",
    "manager",
    "team",
    "operations",
    "productivity",
    "swot",
    "launch",
    "idea",
    "niche",
    "target audience",
    "demand",
    "forecast",
    "license",
    "registration",
    "llc",
    "freelanc",
    "consulting",
];

pub(crate) const SCRIPTS_KW: &[&str] = &[
    "script",
    "screenplay",
    "storyboard",
    "video",
    "youtube",
    "youtuber",
    "shorts",
    "reel",
    "tiktok",
    "instagram",
    "vlog",
    "podcast",
    "episode",
    "channel",
    "subscriber",
    "content",
    "creator",
    "influencer",
    "caption",
    "hook",
    "intro",
    "outro",
    "opening line",
    "call to action",
    "voiceover",
    "voice over",
    "narration",
    "narrator",
    "dialogue",
    "monologue",
    "scene",
    "character",
    "plot",
    "story",
    "storytelling",
    "skit",
    "sketch",
    "comedy",
    "prank",
    "tutorial",
    "review video",
    "unboxing",
    "explainer",
    "ad copy",
    "commercial",
    "advert",
    "promo",
    "trailer",
    "teaser",
    "thumbnail",
    "title idea",
    "viral",
    "trend",
    "engagement",
    "views",
    "audience",
    "shoot",
    "filming",
    "film",
    "movie",
    "short film",
    "documentary",
    "edit",
    "b-roll",
    "transition",
    "speech",
    "presentation",
    "webinar",
    "livestream",
    "live stream",
    "stream",
    "twitch",
    "social media",
    "post",
    "thread",
    "tweet",
    "linkedin",
    "facebook",
    "hashtag",
    "blog",
    "newsletter",
    "copywriting",
    "tagline",
    "slogan",
    "jingle",
    "lyrics",
    "rap",
    "poem",
    "write me",
    "draft",
    "rewrite",
];
