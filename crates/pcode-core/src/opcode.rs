//! P-code operation codes.
//!
//! This module defines the instruction set of the stack machine. The numeric
//! value of every opcode is fixed by the virtual machine, so the order of the
//! table below must never change; new instructions are appended at the end.
//!
//! Besides the numeric code, every opcode carries:
//!
//! - a mnemonic used by listings,
//! - its [`Arity`] (how many inline operands follow the opcode),
//! - its [`OpcodeFamily`], which decides how wide each operand is encoded.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Number of inline operands an instruction carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// A fixed number of operands.
    Fixed(u8),
    /// A leading count `n` followed by `n` operands.
    Counted,
    /// A leading count `n` followed by `n` (value, target) pairs.
    CountedPairs,
}

impl Arity {
    /// Number of operands expected for an instruction whose first operand
    /// (the count, for variable arities) is `count`.
    pub fn operand_count(self, count: Option<i32>) -> Option<usize> {
        match self {
            Arity::Fixed(n) => Some(n as usize),
            Arity::Counted => {
                let n = usize::try_from(count?).ok()?;
                Some(1 + n)
            }
            Arity::CountedPairs => {
                let n = usize::try_from(count?).ok()?;
                Some(1 + 2 * n)
            }
        }
    }

    /// Whether the operand count depends on the first operand.
    pub fn is_variable(self) -> bool {
        !matches!(self, Arity::Fixed(_))
    }
}

/// Instruction families sharing one operand-width rule.
///
/// The encoder never looks at individual opcodes when choosing operand
/// widths; it asks the active encoding policy for the width of a given
/// argument ordinal within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeFamily {
    /// Full-width operands.
    Other,
    /// Line specials. Operand 0 is the special's numeric ID.
    Special,
    /// Operands are always single bytes.
    ByteOnly,
    /// Script/map/world/global variable and array access.
    Storage,
    /// Calls to script functions by index.
    Call,
    /// Calls to built-in functions: argument count, then function index.
    CallFunc,
    /// Binary-searched jump table; operands start on a 4-byte boundary.
    SortedJumpTable,
}

const A0: Arity = Arity::Fixed(0);
const A1: Arity = Arity::Fixed(1);
const A2: Arity = Arity::Fixed(2);
const A3: Arity = Arity::Fixed(3);
const A4: Arity = Arity::Fixed(4);
const A5: Arity = Arity::Fixed(5);
const A6: Arity = Arity::Fixed(6);
const COUNTED: Arity = Arity::Counted;
const PAIRS: Arity = Arity::CountedPairs;

macro_rules! opcodes {
    ($($variant:ident = $code:literal, $name:literal, $arity:expr, $family:ident;)*) => {
        /// P-code operation codes.
        ///
        /// The machine is stack based: most instructions pop their inputs
        /// and push their result, and only the operands listed by
        /// [`Opcode::arity`] are encoded inline.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive,
        )]
        #[repr(u16)]
        pub enum Opcode {
            $($variant = $code,)*
        }

        impl Opcode {
            /// Every opcode, in numeric order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];

            /// Listing mnemonic.
            pub fn name(self) -> &'static str {
                match self {
                    $(Opcode::$variant => $name,)*
                }
            }

            /// Inline operand layout.
            pub fn arity(self) -> Arity {
                match self {
                    $(Opcode::$variant => $arity,)*
                }
            }

            /// Operand-width family.
            pub fn family(self) -> OpcodeFamily {
                match self {
                    $(Opcode::$variant => OpcodeFamily::$family,)*
                }
            }
        }
    };
}

opcodes! {
    Nop = 0, "NOP", A0, Other;
    Terminate = 1, "TERMINATE", A0, Other;
    Suspend = 2, "SUSPEND", A0, Other;
    PushNumber = 3, "PUSH_NUMBER", A1, Other;
    Lspec1 = 4, "LSPEC1", A1, Special;
    Lspec2 = 5, "LSPEC2", A1, Special;
    Lspec3 = 6, "LSPEC3", A1, Special;
    Lspec4 = 7, "LSPEC4", A1, Special;
    Lspec5 = 8, "LSPEC5", A1, Special;
    Lspec1Direct = 9, "LSPEC1_DIRECT", A2, Special;
    Lspec2Direct = 10, "LSPEC2_DIRECT", A3, Special;
    Lspec3Direct = 11, "LSPEC3_DIRECT", A4, Special;
    Lspec4Direct = 12, "LSPEC4_DIRECT", A5, Special;
    Lspec5Direct = 13, "LSPEC5_DIRECT", A6, Special;
    Add = 14, "ADD", A0, Other;
    Subtract = 15, "SUBTRACT", A0, Other;
    Multiply = 16, "MULTIPLY", A0, Other;
    Divide = 17, "DIVIDE", A0, Other;
    Modulus = 18, "MODULUS", A0, Other;
    Eq = 19, "EQ", A0, Other;
    Ne = 20, "NE", A0, Other;
    Lt = 21, "LT", A0, Other;
    Gt = 22, "GT", A0, Other;
    Le = 23, "LE", A0, Other;
    Ge = 24, "GE", A0, Other;
    AssignScriptVar = 25, "ASSIGN_SCRIPT_VAR", A1, Storage;
    AssignMapVar = 26, "ASSIGN_MAP_VAR", A1, Storage;
    AssignWorldVar = 27, "ASSIGN_WORLD_VAR", A1, Storage;
    PushScriptVar = 28, "PUSH_SCRIPT_VAR", A1, Storage;
    PushMapVar = 29, "PUSH_MAP_VAR", A1, Storage;
    PushWorldVar = 30, "PUSH_WORLD_VAR", A1, Storage;
    AddScriptVar = 31, "ADD_SCRIPT_VAR", A1, Storage;
    AddMapVar = 32, "ADD_MAP_VAR", A1, Storage;
    AddWorldVar = 33, "ADD_WORLD_VAR", A1, Storage;
    SubScriptVar = 34, "SUB_SCRIPT_VAR", A1, Storage;
    SubMapVar = 35, "SUB_MAP_VAR", A1, Storage;
    SubWorldVar = 36, "SUB_WORLD_VAR", A1, Storage;
    MulScriptVar = 37, "MUL_SCRIPT_VAR", A1, Storage;
    MulMapVar = 38, "MUL_MAP_VAR", A1, Storage;
    MulWorldVar = 39, "MUL_WORLD_VAR", A1, Storage;
    DivScriptVar = 40, "DIV_SCRIPT_VAR", A1, Storage;
    DivMapVar = 41, "DIV_MAP_VAR", A1, Storage;
    DivWorldVar = 42, "DIV_WORLD_VAR", A1, Storage;
    ModScriptVar = 43, "MOD_SCRIPT_VAR", A1, Storage;
    ModMapVar = 44, "MOD_MAP_VAR", A1, Storage;
    ModWorldVar = 45, "MOD_WORLD_VAR", A1, Storage;
    IncScriptVar = 46, "INC_SCRIPT_VAR", A1, Storage;
    IncMapVar = 47, "INC_MAP_VAR", A1, Storage;
    IncWorldVar = 48, "INC_WORLD_VAR", A1, Storage;
    DecScriptVar = 49, "DEC_SCRIPT_VAR", A1, Storage;
    DecMapVar = 50, "DEC_MAP_VAR", A1, Storage;
    DecWorldVar = 51, "DEC_WORLD_VAR", A1, Storage;
    Goto = 52, "GOTO", A1, Other;
    IfGoto = 53, "IF_GOTO", A1, Other;
    Drop = 54, "DROP", A0, Other;
    Delay = 55, "DELAY", A0, Other;
    DelayDirect = 56, "DELAY_DIRECT", A1, Other;
    Random = 57, "RANDOM", A0, Other;
    RandomDirect = 58, "RANDOM_DIRECT", A2, Other;
    ThingCount = 59, "THING_COUNT", A0, Other;
    ThingCountDirect = 60, "THING_COUNT_DIRECT", A2, Other;
    TagWait = 61, "TAG_WAIT", A0, Other;
    TagWaitDirect = 62, "TAG_WAIT_DIRECT", A1, Other;
    PolyWait = 63, "POLY_WAIT", A0, Other;
    PolyWaitDirect = 64, "POLY_WAIT_DIRECT", A1, Other;
    ChangeFloor = 65, "CHANGE_FLOOR", A0, Other;
    ChangeFloorDirect = 66, "CHANGE_FLOOR_DIRECT", A2, Other;
    ChangeCeiling = 67, "CHANGE_CEILING", A0, Other;
    ChangeCeilingDirect = 68, "CHANGE_CEILING_DIRECT", A2, Other;
    Restart = 69, "RESTART", A0, Other;
    AndLogical = 70, "AND_LOGICAL", A0, Other;
    OrLogical = 71, "OR_LOGICAL", A0, Other;
    AndBitwise = 72, "AND_BITWISE", A0, Other;
    OrBitwise = 73, "OR_BITWISE", A0, Other;
    EorBitwise = 74, "EOR_BITWISE", A0, Other;
    NegateLogical = 75, "NEGATE_LOGICAL", A0, Other;
    LShift = 76, "LSHIFT", A0, Other;
    RShift = 77, "RSHIFT", A0, Other;
    UnaryMinus = 78, "UNARY_MINUS", A0, Other;
    IfNotGoto = 79, "IF_NOT_GOTO", A1, Other;
    LineSide = 80, "LINE_SIDE", A0, Other;
    ScriptWait = 81, "SCRIPT_WAIT", A0, Other;
    ScriptWaitDirect = 82, "SCRIPT_WAIT_DIRECT", A1, Other;
    ClearLineSpecial = 83, "CLEAR_LINE_SPECIAL", A0, Other;
    CaseGoto = 84, "CASE_GOTO", A2, Other;
    BeginPrint = 85, "BEGIN_PRINT", A0, Other;
    EndPrint = 86, "END_PRINT", A0, Other;
    PrintString = 87, "PRINT_STRING", A0, Other;
    PrintNumber = 88, "PRINT_NUMBER", A0, Other;
    PrintCharacter = 89, "PRINT_CHARACTER", A0, Other;
    PlayerCount = 90, "PLAYER_COUNT", A0, Other;
    GameType = 91, "GAME_TYPE", A0, Other;
    GameSkill = 92, "GAME_SKILL", A0, Other;
    Timer = 93, "TIMER", A0, Other;
    SectorSound = 94, "SECTOR_SOUND", A0, Other;
    AmbientSound = 95, "AMBIENT_SOUND", A0, Other;
    SoundSequence = 96, "SOUND_SEQUENCE", A0, Other;
    SetLineTexture = 97, "SET_LINE_TEXTURE", A0, Other;
    SetLineBlocking = 98, "SET_LINE_BLOCKING", A0, Other;
    SetLineSpecial = 99, "SET_LINE_SPECIAL", A0, Other;
    ThingSound = 100, "THING_SOUND", A0, Other;
    EndPrintBold = 101, "END_PRINT_BOLD", A0, Other;
    ActivatorSound = 102, "ACTIVATOR_SOUND", A0, Other;
    LocalAmbientSound = 103, "LOCAL_AMBIENT_SOUND", A0, Other;
    SetLineMonsterBlocking = 104, "SET_LINE_MONSTER_BLOCKING", A0, Other;
    PlayerBlueSkull = 105, "PLAYER_BLUE_SKULL", A0, Other;
    PlayerRedSkull = 106, "PLAYER_RED_SKULL", A0, Other;
    PlayerYellowSkull = 107, "PLAYER_YELLOW_SKULL", A0, Other;
    PlayerMasterSkull = 108, "PLAYER_MASTER_SKULL", A0, Other;
    PlayerBlueCard = 109, "PLAYER_BLUE_CARD", A0, Other;
    PlayerRedCard = 110, "PLAYER_RED_CARD", A0, Other;
    PlayerYellowCard = 111, "PLAYER_YELLOW_CARD", A0, Other;
    PlayerMasterCard = 112, "PLAYER_MASTER_CARD", A0, Other;
    PlayerBlackSkull = 113, "PLAYER_BLACK_SKULL", A0, Other;
    PlayerSilverSkull = 114, "PLAYER_SILVER_SKULL", A0, Other;
    PlayerGoldSkull = 115, "PLAYER_GOLD_SKULL", A0, Other;
    PlayerBlackCard = 116, "PLAYER_BLACK_CARD", A0, Other;
    PlayerSilverCard = 117, "PLAYER_SILVER_CARD", A0, Other;
    PlayerOnTeam = 118, "PLAYER_ON_TEAM", A0, Other;
    PlayerTeam = 119, "PLAYER_TEAM", A0, Other;
    PlayerHealth = 120, "PLAYER_HEALTH", A0, Other;
    PlayerArmorPoints = 121, "PLAYER_ARMOR_POINTS", A0, Other;
    PlayerFrags = 122, "PLAYER_FRAGS", A0, Other;
    PlayerExpert = 123, "PLAYER_EXPERT", A0, Other;
    BlueTeamCount = 124, "BLUE_TEAM_COUNT", A0, Other;
    RedTeamCount = 125, "RED_TEAM_COUNT", A0, Other;
    BlueTeamScore = 126, "BLUE_TEAM_SCORE", A0, Other;
    RedTeamScore = 127, "RED_TEAM_SCORE", A0, Other;
    IsOneFlagCtf = 128, "IS_ONE_FLAG_CTF", A0, Other;
    GetInvasionWave = 129, "GET_INVASION_WAVE", A0, Other;
    GetInvasionState = 130, "GET_INVASION_STATE", A0, Other;
    PrintName = 131, "PRINT_NAME", A0, Other;
    MusicChange = 132, "MUSIC_CHANGE", A0, Other;
    ConsoleCommandDirect = 133, "CONSOLE_COMMAND_DIRECT", A3, Other;
    ConsoleCommand = 134, "CONSOLE_COMMAND", A0, Other;
    SinglePlayer = 135, "SINGLE_PLAYER", A0, Other;
    FixedMul = 136, "FIXED_MUL", A0, Other;
    FixedDiv = 137, "FIXED_DIV", A0, Other;
    SetGravity = 138, "SET_GRAVITY", A0, Other;
    SetGravityDirect = 139, "SET_GRAVITY_DIRECT", A1, Other;
    SetAirControl = 140, "SET_AIR_CONTROL", A0, Other;
    SetAirControlDirect = 141, "SET_AIR_CONTROL_DIRECT", A1, Other;
    ClearInventory = 142, "CLEAR_INVENTORY", A0, Other;
    GiveInventory = 143, "GIVE_INVENTORY", A0, Other;
    GiveInventoryDirect = 144, "GIVE_INVENTORY_DIRECT", A2, Other;
    TakeInventory = 145, "TAKE_INVENTORY", A0, Other;
    TakeInventoryDirect = 146, "TAKE_INVENTORY_DIRECT", A2, Other;
    CheckInventory = 147, "CHECK_INVENTORY", A0, Other;
    CheckInventoryDirect = 148, "CHECK_INVENTORY_DIRECT", A1, Other;
    Spawn = 149, "SPAWN", A0, Other;
    SpawnDirect = 150, "SPAWN_DIRECT", A6, Other;
    SpawnSpot = 151, "SPAWN_SPOT", A0, Other;
    SpawnSpotDirect = 152, "SPAWN_SPOT_DIRECT", A4, Other;
    SetMusic = 153, "SET_MUSIC", A0, Other;
    SetMusicDirect = 154, "SET_MUSIC_DIRECT", A3, Other;
    LocalSetMusic = 155, "LOCAL_SET_MUSIC", A0, Other;
    LocalSetMusicDirect = 156, "LOCAL_SET_MUSIC_DIRECT", A3, Other;
    PrintFixed = 157, "PRINT_FIXED", A0, Other;
    PrintLocalized = 158, "PRINT_LOCALIZED", A0, Other;
    MoreHudMessage = 159, "MORE_HUD_MESSAGE", A0, Other;
    OptHudMessage = 160, "OPT_HUD_MESSAGE", A0, Other;
    EndHudMessage = 161, "END_HUD_MESSAGE", A0, Other;
    EndHudMessageBold = 162, "END_HUD_MESSAGE_BOLD", A0, Other;
    SetStyle = 163, "SET_STYLE", A0, Other;
    SetStyleDirect = 164, "SET_STYLE_DIRECT", A1, Other;
    SetFont = 165, "SET_FONT", A0, Other;
    SetFontDirect = 166, "SET_FONT_DIRECT", A1, Other;
    PushByte = 167, "PUSH_BYTE", A1, ByteOnly;
    Lspec1DirectB = 168, "LSPEC1_DIRECT_B", A2, ByteOnly;
    Lspec2DirectB = 169, "LSPEC2_DIRECT_B", A3, ByteOnly;
    Lspec3DirectB = 170, "LSPEC3_DIRECT_B", A4, ByteOnly;
    Lspec4DirectB = 171, "LSPEC4_DIRECT_B", A5, ByteOnly;
    Lspec5DirectB = 172, "LSPEC5_DIRECT_B", A6, ByteOnly;
    DelayDirectB = 173, "DELAY_DIRECT_B", A1, ByteOnly;
    RandomDirectB = 174, "RANDOM_DIRECT_B", A2, ByteOnly;
    PushBytes = 175, "PUSH_BYTES", COUNTED, ByteOnly;
    Push2Bytes = 176, "PUSH_2BYTES", A2, ByteOnly;
    Push3Bytes = 177, "PUSH_3BYTES", A3, ByteOnly;
    Push4Bytes = 178, "PUSH_4BYTES", A4, ByteOnly;
    Push5Bytes = 179, "PUSH_5BYTES", A5, ByteOnly;
    SetThingSpecial = 180, "SET_THING_SPECIAL", A0, Other;
    AssignGlobalVar = 181, "ASSIGN_GLOBAL_VAR", A1, Storage;
    PushGlobalVar = 182, "PUSH_GLOBAL_VAR", A1, Storage;
    AddGlobalVar = 183, "ADD_GLOBAL_VAR", A1, Storage;
    SubGlobalVar = 184, "SUB_GLOBAL_VAR", A1, Storage;
    MulGlobalVar = 185, "MUL_GLOBAL_VAR", A1, Storage;
    DivGlobalVar = 186, "DIV_GLOBAL_VAR", A1, Storage;
    ModGlobalVar = 187, "MOD_GLOBAL_VAR", A1, Storage;
    IncGlobalVar = 188, "INC_GLOBAL_VAR", A1, Storage;
    DecGlobalVar = 189, "DEC_GLOBAL_VAR", A1, Storage;
    FadeTo = 190, "FADE_TO", A0, Other;
    FadeRange = 191, "FADE_RANGE", A0, Other;
    CancelFade = 192, "CANCEL_FADE", A0, Other;
    PlayMovie = 193, "PLAY_MOVIE", A0, Other;
    SetFloorTrigger = 194, "SET_FLOOR_TRIGGER", A0, Other;
    SetCeilingTrigger = 195, "SET_CEILING_TRIGGER", A0, Other;
    GetActorX = 196, "GET_ACTOR_X", A0, Other;
    GetActorY = 197, "GET_ACTOR_Y", A0, Other;
    GetActorZ = 198, "GET_ACTOR_Z", A0, Other;
    StartTranslation = 199, "START_TRANSLATION", A0, Other;
    TranslationRange1 = 200, "TRANSLATION_RANGE1", A0, Other;
    TranslationRange2 = 201, "TRANSLATION_RANGE2", A0, Other;
    EndTranslation = 202, "END_TRANSLATION", A0, Other;
    Call = 203, "CALL", A1, Call;
    CallDiscard = 204, "CALL_DISCARD", A1, Call;
    ReturnVoid = 205, "RETURN_VOID", A0, Other;
    ReturnVal = 206, "RETURN_VAL", A0, Other;
    PushMapArray = 207, "PUSH_MAP_ARRAY", A1, Storage;
    AssignMapArray = 208, "ASSIGN_MAP_ARRAY", A1, Storage;
    AddMapArray = 209, "ADD_MAP_ARRAY", A1, Storage;
    SubMapArray = 210, "SUB_MAP_ARRAY", A1, Storage;
    MulMapArray = 211, "MUL_MAP_ARRAY", A1, Storage;
    DivMapArray = 212, "DIV_MAP_ARRAY", A1, Storage;
    ModMapArray = 213, "MOD_MAP_ARRAY", A1, Storage;
    IncMapArray = 214, "INC_MAP_ARRAY", A1, Storage;
    DecMapArray = 215, "DEC_MAP_ARRAY", A1, Storage;
    Dup = 216, "DUP", A0, Other;
    Swap = 217, "SWAP", A0, Other;
    WriteToIni = 218, "WRITE_TO_INI", A0, Other;
    GetFromIni = 219, "GET_FROM_INI", A0, Other;
    Sin = 220, "SIN", A0, Other;
    Cos = 221, "COS", A0, Other;
    VectorAngle = 222, "VECTOR_ANGLE", A0, Other;
    CheckWeapon = 223, "CHECK_WEAPON", A0, Other;
    SetWeapon = 224, "SET_WEAPON", A0, Other;
    TagString = 225, "TAG_STRING", A0, Other;
    PushWorldArray = 226, "PUSH_WORLD_ARRAY", A1, Storage;
    AssignWorldArray = 227, "ASSIGN_WORLD_ARRAY", A1, Storage;
    AddWorldArray = 228, "ADD_WORLD_ARRAY", A1, Storage;
    SubWorldArray = 229, "SUB_WORLD_ARRAY", A1, Storage;
    MulWorldArray = 230, "MUL_WORLD_ARRAY", A1, Storage;
    DivWorldArray = 231, "DIV_WORLD_ARRAY", A1, Storage;
    ModWorldArray = 232, "MOD_WORLD_ARRAY", A1, Storage;
    IncWorldArray = 233, "INC_WORLD_ARRAY", A1, Storage;
    DecWorldArray = 234, "DEC_WORLD_ARRAY", A1, Storage;
    PushGlobalArray = 235, "PUSH_GLOBAL_ARRAY", A1, Storage;
    AssignGlobalArray = 236, "ASSIGN_GLOBAL_ARRAY", A1, Storage;
    AddGlobalArray = 237, "ADD_GLOBAL_ARRAY", A1, Storage;
    SubGlobalArray = 238, "SUB_GLOBAL_ARRAY", A1, Storage;
    MulGlobalArray = 239, "MUL_GLOBAL_ARRAY", A1, Storage;
    DivGlobalArray = 240, "DIV_GLOBAL_ARRAY", A1, Storage;
    ModGlobalArray = 241, "MOD_GLOBAL_ARRAY", A1, Storage;
    IncGlobalArray = 242, "INC_GLOBAL_ARRAY", A1, Storage;
    DecGlobalArray = 243, "DEC_GLOBAL_ARRAY", A1, Storage;
    SetMarineWeapon = 244, "SET_MARINE_WEAPON", A0, Other;
    SetActorProperty = 245, "SET_ACTOR_PROPERTY", A0, Other;
    GetActorProperty = 246, "GET_ACTOR_PROPERTY", A0, Other;
    PlayerNumber = 247, "PLAYER_NUMBER", A0, Other;
    ActivatorTid = 248, "ACTIVATOR_TID", A0, Other;
    SetMarineSprite = 249, "SET_MARINE_SPRITE", A0, Other;
    GetScreenWidth = 250, "GET_SCREEN_WIDTH", A0, Other;
    GetScreenHeight = 251, "GET_SCREEN_HEIGHT", A0, Other;
    ThingProjectile2 = 252, "THING_PROJECTILE2", A0, Other;
    StrLen = 253, "STR_LEN", A0, Other;
    GetHudSize = 254, "GET_HUD_SIZE", A0, Other;
    GetCvar = 255, "GET_CVAR", A0, Other;
    CaseGotoSorted = 256, "CASE_GOTO_SORTED", PAIRS, SortedJumpTable;
    SetResultValue = 257, "SET_RESULT_VALUE", A0, Other;
    GetLineRowOffset = 258, "GET_LINE_ROW_OFFSET", A0, Other;
    GetActorFloorZ = 259, "GET_ACTOR_FLOOR_Z", A0, Other;
    GetActorAngle = 260, "GET_ACTOR_ANGLE", A0, Other;
    GetSectorFloorZ = 261, "GET_SECTOR_FLOOR_Z", A0, Other;
    GetSectorCeilingZ = 262, "GET_SECTOR_CEILING_Z", A0, Other;
    Lspec5Result = 263, "LSPEC5_RESULT", A1, Special;
    GetSigilPieces = 264, "GET_SIGIL_PIECES", A0, Other;
    GetLevelInfo = 265, "GET_LEVEL_INFO", A0, Other;
    ChangeSky = 266, "CHANGE_SKY", A0, Other;
    PlayerInGame = 267, "PLAYER_IN_GAME", A0, Other;
    PlayerIsBot = 268, "PLAYER_IS_BOT", A0, Other;
    SetCameraToTexture = 269, "SET_CAMERA_TO_TEXTURE", A0, Other;
    EndLog = 270, "END_LOG", A0, Other;
    GetAmmoCapacity = 271, "GET_AMMO_CAPACITY", A0, Other;
    SetAmmoCapacity = 272, "SET_AMMO_CAPACITY", A0, Other;
    PrintMapCharArray = 273, "PRINT_MAP_CHAR_ARRAY", A0, Other;
    PrintWorldCharArray = 274, "PRINT_WORLD_CHAR_ARRAY", A0, Other;
    PrintGlobalCharArray = 275, "PRINT_GLOBAL_CHAR_ARRAY", A0, Other;
    SetActorAngle = 276, "SET_ACTOR_ANGLE", A0, Other;
    GrabInput = 277, "GRAB_INPUT", A0, Other;
    SetMousePointer = 278, "SET_MOUSE_POINTER", A0, Other;
    MoveMousePointer = 279, "MOVE_MOUSE_POINTER", A0, Other;
    SpawnProjectile = 280, "SPAWN_PROJECTILE", A0, Other;
    GetSectorLightLevel = 281, "GET_SECTOR_LIGHT_LEVEL", A0, Other;
    GetActorCeilingZ = 282, "GET_ACTOR_CEILING_Z", A0, Other;
    GetActorPositionZ = 283, "GET_ACTOR_POSITION_Z", A0, Other;
    ClearActorInventory = 284, "CLEAR_ACTOR_INVENTORY", A0, Other;
    GiveActorInventory = 285, "GIVE_ACTOR_INVENTORY", A0, Other;
    TakeActorInventory = 286, "TAKE_ACTOR_INVENTORY", A0, Other;
    CheckActorInventory = 287, "CHECK_ACTOR_INVENTORY", A0, Other;
    ThingCountName = 288, "THING_COUNT_NAME", A0, Other;
    SpawnSpotFacing = 289, "SPAWN_SPOT_FACING", A0, Other;
    PlayerClass = 290, "PLAYER_CLASS", A0, Other;
    AndScriptVar = 291, "AND_SCRIPT_VAR", A1, Storage;
    AndMapVar = 292, "AND_MAP_VAR", A1, Storage;
    AndWorldVar = 293, "AND_WORLD_VAR", A1, Storage;
    AndGlobalVar = 294, "AND_GLOBAL_VAR", A1, Storage;
    AndMapArray = 295, "AND_MAP_ARRAY", A1, Storage;
    AndWorldArray = 296, "AND_WORLD_ARRAY", A1, Storage;
    AndGlobalArray = 297, "AND_GLOBAL_ARRAY", A1, Storage;
    EorScriptVar = 298, "EOR_SCRIPT_VAR", A1, Storage;
    EorMapVar = 299, "EOR_MAP_VAR", A1, Storage;
    EorWorldVar = 300, "EOR_WORLD_VAR", A1, Storage;
    EorGlobalVar = 301, "EOR_GLOBAL_VAR", A1, Storage;
    EorMapArray = 302, "EOR_MAP_ARRAY", A1, Storage;
    EorWorldArray = 303, "EOR_WORLD_ARRAY", A1, Storage;
    EorGlobalArray = 304, "EOR_GLOBAL_ARRAY", A1, Storage;
    OrScriptVar = 305, "OR_SCRIPT_VAR", A1, Storage;
    OrMapVar = 306, "OR_MAP_VAR", A1, Storage;
    OrWorldVar = 307, "OR_WORLD_VAR", A1, Storage;
    OrGlobalVar = 308, "OR_GLOBAL_VAR", A1, Storage;
    OrMapArray = 309, "OR_MAP_ARRAY", A1, Storage;
    OrWorldArray = 310, "OR_WORLD_ARRAY", A1, Storage;
    OrGlobalArray = 311, "OR_GLOBAL_ARRAY", A1, Storage;
    LsScriptVar = 312, "LS_SCRIPT_VAR", A1, Storage;
    LsMapVar = 313, "LS_MAP_VAR", A1, Storage;
    LsWorldVar = 314, "LS_WORLD_VAR", A1, Storage;
    LsGlobalVar = 315, "LS_GLOBAL_VAR", A1, Storage;
    LsMapArray = 316, "LS_MAP_ARRAY", A1, Storage;
    LsWorldArray = 317, "LS_WORLD_ARRAY", A1, Storage;
    LsGlobalArray = 318, "LS_GLOBAL_ARRAY", A1, Storage;
    RsScriptVar = 319, "RS_SCRIPT_VAR", A1, Storage;
    RsMapVar = 320, "RS_MAP_VAR", A1, Storage;
    RsWorldVar = 321, "RS_WORLD_VAR", A1, Storage;
    RsGlobalVar = 322, "RS_GLOBAL_VAR", A1, Storage;
    RsMapArray = 323, "RS_MAP_ARRAY", A1, Storage;
    RsWorldArray = 324, "RS_WORLD_ARRAY", A1, Storage;
    RsGlobalArray = 325, "RS_GLOBAL_ARRAY", A1, Storage;
    GetPlayerInfo = 326, "GET_PLAYER_INFO", A0, Other;
    ChangeLevel = 327, "CHANGE_LEVEL", A0, Other;
    SectorDamage = 328, "SECTOR_DAMAGE", A0, Other;
    ReplaceTextures = 329, "REPLACE_TEXTURES", A0, Other;
    NegateBinary = 330, "NEGATE_BINARY", A0, Other;
    GetActorPitch = 331, "GET_ACTOR_PITCH", A0, Other;
    SetActorPitch = 332, "SET_ACTOR_PITCH", A0, Other;
    PrintBind = 333, "PRINT_BIND", A0, Other;
    SetActorState = 334, "SET_ACTOR_STATE", A0, Other;
    ThingDamage2 = 335, "THING_DAMAGE2", A0, Other;
    UseInventory = 336, "USE_INVENTORY", A0, Other;
    UseActorInventory = 337, "USE_ACTOR_INVENTORY", A0, Other;
    CheckActorCeilingTexture = 338, "CHECK_ACTOR_CEILING_TEXTURE", A0, Other;
    CheckActorFloorTexture = 339, "CHECK_ACTOR_FLOOR_TEXTURE", A0, Other;
    GetActorLightLevel = 340, "GET_ACTOR_LIGHT_LEVEL", A0, Other;
    SetMugshotState = 341, "SET_MUGSHOT_STATE", A0, Other;
    ThingCountSector = 342, "THING_COUNT_SECTOR", A0, Other;
    ThingCountNameSector = 343, "THING_COUNT_NAME_SECTOR", A0, Other;
    CheckPlayerCamera = 344, "CHECK_PLAYER_CAMERA", A0, Other;
    MorphActor = 345, "MORPH_ACTOR", A0, Other;
    UnmorphActor = 346, "UNMORPH_ACTOR", A0, Other;
    GetPlayerInput = 347, "GET_PLAYER_INPUT", A0, Other;
    ClassifyActor = 348, "CLASSIFY_ACTOR", A0, Other;
    PrintBinary = 349, "PRINT_BINARY", A0, Other;
    PrintHex = 350, "PRINT_HEX", A0, Other;
    CallFunc = 351, "CALL_FUNC", A2, CallFunc;
    SaveString = 352, "SAVE_STRING", A0, Other;
}

impl Opcode {
    /// Numeric code as stored in the instruction stream.
    pub fn code(self) -> u16 {
        self.into()
    }

    /// Convert from a numeric code, returning None for unknown codes.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Whether this opcode pushes inline byte values onto the stack.
    pub fn is_byte_push(self) -> bool {
        matches!(
            self,
            Opcode::PushByte
                | Opcode::Push2Bytes
                | Opcode::Push3Bytes
                | Opcode::Push4Bytes
                | Opcode::Push5Bytes
                | Opcode::PushBytes
        )
    }

    /// Whether this opcode is a branch whose operand is a code offset.
    pub fn is_branch(self) -> bool {
        matches!(self, Opcode::Goto | Opcode::IfGoto | Opcode::IfNotGoto)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
