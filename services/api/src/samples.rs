use municipal_intel::Document;

/// Representative city records spanning every priority tier.
const SAMPLE_DOCUMENTS: &[(&str, &str)] = &[
    (
        "cannabis_retail_ordinance_approved.txt",
        "CITY COUNCIL MEETING MINUTES\n\
         Date: December 15, 2024\n\
         \n\
         AGENDA ITEM 7.3: CANNABIS RETAIL ORDINANCE\n\
         After a public hearing and planning commission review the council voted 5-2 and the \
         cannabis retail ordinance approved on second reading establishes a licensing program. \
         The application window opens January 15, 2025 and the application period closes \
         February 14, 2025. Merit-based selection will award the first five dispensary license \
         slots. A conditional use permit approved for C-2 zones completes the package.\n\
         Ordinance effective immediately.",
    ),
    (
        "dispensary_license_application.txt",
        "DEPARTMENT OF LICENSING AND PERMITS\n\
         Date: February 1, 2025\n\
         \n\
         NOTICE: DISPENSARY LICENSE APPLICATION WINDOW OPEN\n\
         The city is accepting applications for three dispensary licenses in the north district. \
         The application period runs from February 1 to March 1, 2025. Merit-based selection \
         criteria include business experience and community benefit plans.",
    ),
    (
        "planning_commission_hearing.txt",
        "PLANNING COMMISSION MEETING\n\
         Date: November 28, 2024\n\
         \n\
         PUBLIC HEARING: DRAFT ORDINANCE - CANNABIS BUSINESS ZONING\n\
         The commission held a public hearing on a zoning amendment for cannabis business \
         operations. The draft ordinance would allow cannabis retail and processing in \
         industrial zones. Speakers cited potential tax revenue.\n\
         Study session scheduled for December 10. Item continued.",
    ),
    (
        "social_equity_program.txt",
        "DEPARTMENT OF ECONOMIC DEVELOPMENT\n\
         Date: January 20, 2025\n\
         \n\
         SOCIAL EQUITY CANNABIS BUSINESS PROGRAM\n\
         The city launched a social equity program offering technical assistance and reduced \
         fees to local applicants. Study session scheduled for February 15.",
    ),
    (
        "moratorium_lifted.txt",
        "CITY COUNCIL SPECIAL MEETING\n\
         Date: January 10, 2025\n\
         \n\
         EMERGENCY ITEM: MORATORIUM LIFTED\n\
         The council voted unanimously to end the temporary pause on new applications. \
         New business applications may be submitted starting next month.",
    ),
    (
        "city_budget_discussion.txt",
        "ANNUAL BUDGET WORKSHOP\n\
         Date: October 20, 2024\n\
         \n\
         Finance staff presented revenue projections for the upcoming fiscal year, \
         including cannabis excise receipts from existing operators. No action items were proposed.",
    ),
    (
        "cannabis_retail_denied.txt",
        "PLANNING COMMISSION DECISION\n\
         Date: December 20, 2024\n\
         \n\
         USE PERMIT DENIED\n\
         The commission rejected a proposed storefront at 123 Main Street. The applicant \
         may appeal within 30 days.",
    ),
    (
        "park_maintenance.txt",
        "PARKS AND RECREATION DEPARTMENT\n\
         Date: January 15, 2025\n\
         \n\
         PARK MAINTENANCE SCHEDULE\n\
         Routine landscaping, playground inspection and facility repairs are scheduled for \
         all city parks. Work will be completed by March 1, 2025.",
    ),
    (
        "library_hours.txt",
        "PUBLIC LIBRARY ANNOUNCEMENT\n\
         Date: January 25, 2025\n\
         \n\
         LIBRARY HOURS UPDATE\n\
         Extended hours begin February 1, 2025: weekdays 9 AM to 8 PM and weekends 10 AM to 6 PM.",
    ),
];

pub(crate) fn sample_documents() -> Vec<Document> {
    SAMPLE_DOCUMENTS
        .iter()
        .map(|(name, text)| Document::new(*name, *text))
        .collect()
}
