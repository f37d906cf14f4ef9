//! Association records, distilled from CPIC guideline gene-drug pairs.
//! RxNorm CUIs and ATC codes are carried where the source annotated them.

use super::GeneDrugAssociation;

const fn pair(gene: &'static str, drug: &'static str) -> GeneDrugAssociation {
    GeneDrugAssociation {
        gene,
        drug,
        rxnorm_id: None,
        atc_code: None,
    }
}

const fn pair_ids(
    gene: &'static str,
    drug: &'static str,
    rxnorm_id: &'static str,
    atc_code: &'static str,
) -> GeneDrugAssociation {
    GeneDrugAssociation {
        gene,
        drug,
        rxnorm_id: Some(rxnorm_id),
        atc_code: Some(atc_code),
    }
}

pub(super) const ASSOCIATIONS: &[GeneDrugAssociation] = &[
    // Core six drugs
    pair_ids("CYP2D6", "codeine", "2670", "R05DA04"),
    pair_ids("CYP2C9", "warfarin", "11289", "B01AA03"),
    pair_ids("CYP2C19", "clopidogrel", "32968", "B01AC04"),
    pair_ids("SLCO1B1", "simvastatin", "36567", "C10AA01"),
    pair_ids("TPMT", "azathioprine", "1256", "L04AX01"),
    pair_ids("DPYD", "fluorouracil", "4492", "L01BC02"),
    // Multi-gene drugs
    pair("CYP4F2", "warfarin"),
    pair("VKORC1", "warfarin"),
    pair("NUDT15", "azathioprine"),
    pair("HLA-A", "carbamazepine"),
    pair("HLA-B", "carbamazepine"),
    pair("SCN1A", "carbamazepine"),
    pair("CYP2C9", "phenytoin"),
    pair("HLA-B", "phenytoin"),
    pair("SCN1A", "phenytoin"),
    pair("CYP2C9", "fosphenytoin"),
    pair("HLA-B", "fosphenytoin"),
    // CYP2D6 opioids and antiemetics
    pair("CYP2D6", "tramadol"),
    pair("CYP2D6", "hydrocodone"),
    pair("CYP2D6", "oxycodone"),
    pair("CYP2D6", "oliceridine"),
    pair("CYP2D6", "ondansetron"),
    pair("CYP2D6", "tropisetron"),
    pair("CYP2D6", "palonosetron"),
    pair("CYP2D6", "dolasetron"),
    pair("CYP2D6", "metoclopramide"),
    // CYP2D6 antidepressants and antipsychotics
    pair("CYP2D6", "amitriptyline"),
    pair("CYP2D6", "nortriptyline"),
    pair("CYP2D6", "clomipramine"),
    pair("CYP2D6", "desipramine"),
    pair("CYP2D6", "doxepin"),
    pair("CYP2D6", "imipramine"),
    pair("CYP2D6", "trimipramine"),
    pair("CYP2D6", "paroxetine"),
    pair("CYP2D6", "fluvoxamine"),
    pair("CYP2D6", "venlafaxine"),
    pair("CYP2D6", "mirtazapine"),
    pair("CYP2D6", "aripiprazole"),
    pair("CYP2D6", "brexpiprazole"),
    pair("CYP2D6", "risperidone"),
    pair("CYP2D6", "haloperidol"),
    pair("CYP2D6", "iloperidone"),
    pair("CYP2D6", "perphenazine"),
    pair("CYP2D6", "pimozide"),
    pair("CYP2D6", "thioridazine"),
    pair("CYP2D6", "zuclopenthixol"),
    // CYP2D6 cardiovascular
    pair("CYP2D6", "metoprolol"),
    pair("CYP2D6", "carvedilol"),
    pair("CYP2D6", "nebivolol"),
    pair("CYP2D6", "propranolol"),
    pair("CYP2D6", "propafenone"),
    pair("CYP2D6", "flecainide"),
    // CYP2D6 other
    pair("CYP2D6", "atomoxetine"),
    pair("CYP2D6", "tamoxifen"),
    pair("CYP2D6", "dextromethorphan"),
    pair("CYP2D6", "eliglustat"),
    pair("CYP2D6", "tetrabenazine"),
    pair("CYP2D6", "deutetrabenazine"),
    pair("CYP2D6", "valbenazine"),
    pair("CYP2D6", "tolterodine"),
    pair("CYP2D6", "fesoterodine"),
    pair("CYP2D6", "darifenacin"),
    pair("CYP2D6", "tamsulosin"),
    pair("CYP2D6", "galantamine"),
    pair("CYP2D6", "donepezil"),
    pair("CYP2D6", "pitolisant"),
    pair("CYP2D6", "terbinafine"),
    // CYP2C19
    pair("CYP2C19", "citalopram"),
    pair("CYP2C19", "escitalopram"),
    pair("CYP2C19", "sertraline"),
    pair("CYP2C19", "voriconazole"),
    pair("CYP2C19", "omeprazole"),
    pair("CYP2C19", "esomeprazole"),
    pair("CYP2C19", "pantoprazole"),
    pair("CYP2C19", "lansoprazole"),
    pair("CYP2C19", "dexlansoprazole"),
    pair("CYP2C19", "rabeprazole"),
    pair("CYP2C19", "brivaracetam"),
    pair("CYP2C19", "carisoprodol"),
    pair("CYP2C19", "clobazam"),
    pair("CYP2C19", "diazepam"),
    // CYP2C9 NSAIDs and others
    pair("CYP2C9", "celecoxib"),
    pair("CYP2C9", "ibuprofen"),
    pair("CYP2C9", "flurbiprofen"),
    pair("CYP2C9", "meloxicam"),
    pair("CYP2C9", "piroxicam"),
    pair("CYP2C9", "tenoxicam"),
    pair("CYP2C9", "lornoxicam"),
    pair("CYP2C9", "acenocoumarol"),
    pair("CYP2C9", "siponimod"),
    // SLCO1B1 statins
    pair("SLCO1B1", "atorvastatin"),
    pair("SLCO1B1", "pravastatin"),
    pair("SLCO1B1", "rosuvastatin"),
    pair("SLCO1B1", "pitavastatin"),
    pair("SLCO1B1", "fluvastatin"),
    pair("SLCO1B1", "lovastatin"),
    pair("SLCO1B1", "methotrexate"),
    // Thiopurines (source lists azathioprine under both blocks)
    pair("TPMT", "azathioprine"),
    pair("TPMT", "mercaptopurine"),
    pair("TPMT", "thioguanine"),
    pair("NUDT15", "mercaptopurine"),
    pair("NUDT15", "thioguanine"),
    // DPYD fluoropyrimidines
    pair("DPYD", "capecitabine"),
    pair("DPYD", "tegafur"),
    // HLA-B
    pair("HLA-B", "abacavir"),
    pair("HLA-B", "allopurinol"),
    pair("HLA-B", "oxcarbazepine"),
    pair("HLA-B", "dapsone"),
    pair("HLA-B", "nevirapine"),
    pair("HLA-B", "propylthiouracil"),
    pair("HLA-B", "methimazole"),
    pair("HLA-B", "pazopanib"),
    // UGT1A1
    pair("UGT1A1", "irinotecan"),
    pair("UGT1A1", "atazanavir"),
    pair("UGT1A1", "dolutegravir"),
    pair("UGT1A1", "nilotinib"),
    pair("UGT1A1", "pazopanib"),
    pair("UGT1A1", "raltegravir"),
    pair("UGT1A1", "belinostat"),
    // VKORC1
    pair("VKORC1", "phenprocoumon"),
    // CYP2B6
    pair("CYP2B6", "efavirenz"),
    pair("CYP2B6", "methadone"),
    pair("CYP2B6", "sertraline"),
    // CYP3A5
    pair("CYP3A5", "tacrolimus"),
    // G6PD
    pair("G6PD", "rasburicase"),
    pair("G6PD", "pegloticase"),
    // MT-RNR1 aminoglycosides
    pair("MT-RNR1", "gentamicin"),
    pair("MT-RNR1", "tobramycin"),
    // RYR1 / CACNA1S volatile anesthetics
    pair("RYR1", "sevoflurane"),
    pair("RYR1", "succinylcholine"),
    pair("CACNA1S", "sevoflurane"),
    pair("CACNA1S", "succinylcholine"),
];
